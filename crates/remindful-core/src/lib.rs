//! # Remindful Core Library
//!
//! Core business logic for the Remindful reminder and habit tracker.
//! All operations are available through a standalone CLI binary; any GUI
//! is expected to be a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Scheduler**: A wall-clock-based matcher that requires the caller
//!   to periodically invoke `tick()` to fire due reminders
//! - **Storage**: SQLite-based user/reminder persistence and TOML-based
//!   configuration
//! - **Gamification**: Pure transitions over per-user stats, emitting
//!   events for points, levels, and achievements
//! - **Auth**: bcrypt-hashed credentials with a single-slot local session
//!
//! ## Key Components
//!
//! - [`Store`]: User, reminder, and session persistence
//! - [`AuthGateway`]: Registration, login, logout
//! - [`ReminderRepo`]: Session-scoped reminder CRUD and user state
//! - [`Scheduler`]: Tick-driven reminder firing
//! - [`Config`]: Application configuration management

pub mod analytics;
pub mod auth;
pub mod error;
pub mod events;
pub mod filter;
pub mod gamification;
pub mod model;
pub mod notify;
pub mod reminders;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use analytics::{summarize, Analytics};
pub use auth::AuthGateway;
pub use error::{ConfigError, CoreError, Result, StorageError};
pub use events::{FireEvent, GameEvent};
pub use filter::{DateWindow, ReminderFilter, StatusFilter};
pub use gamification::{Achievement, ACHIEVEMENTS};
pub use model::{
    AchievementRecord, NewReminder, Priority, Reminder, ReminderId, ReminderKind, ReminderPatch,
    SavedFilter, SettingsPatch, User, UserId, UserSettings, UserStats,
};
pub use notify::{Announcer, Notifier, ToneEmitter};
pub use reminders::ReminderRepo;
pub use scheduler::{Scheduler, DEFAULT_TICK_SECS};
pub use session::SessionManager;
pub use storage::{Config, Store};
