mod config;
pub mod store;

pub use config::Config;
pub use store::Store;

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Returns `~/.config/remindful[-dev]/` based on REMINDFUL_ENV.
///
/// Set REMINDFUL_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REMINDFUL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("remindful-dev")
    } else {
        base_dir.join("remindful")
    };

    std::fs::create_dir_all(&dir).map_err(CoreError::Io)?;
    Ok(dir)
}
