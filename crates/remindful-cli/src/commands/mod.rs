pub mod auth;
pub mod export;
pub mod filter;
pub mod reminder;
pub mod settings;
pub mod stats;
pub mod water;
pub mod watch;
