//! SQLite-backed object store for users, reminders, and the session pointer.
//!
//! Three tables mirror the three collections of the original store:
//! - `users` with unique indices on username and email
//! - `reminders` with non-unique indices on user_id, date, completed
//! - `sessions`, a single row keyed by a fixed literal
//!
//! Uniqueness of username/email is enforced by the engine at insert time,
//! so two concurrent registrations cannot both succeed.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::{CoreError, Result, StorageError};
use crate::model::{
    AchievementRecord, NewReminder, Priority, Reminder, ReminderId, ReminderKind, SavedFilter,
    User, UserId, UserSettings, UserStats,
};

/// Fixed key of the singleton session row.
const SESSION_KEY: &str = "current_user";

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_optional_datetime(dt_str: Option<String>) -> Option<DateTime<Utc>> {
    dt_str
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Build a Reminder from a database row (column order of REMINDER_COLUMNS).
fn row_to_reminder(row: &rusqlite::Row) -> std::result::Result<Reminder, rusqlite::Error> {
    let kind_str: String = row.get(6)?;
    let priority_str: String = row.get(7)?;
    let date_str: Option<String> = row.get(4)?;
    let date = date_str.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok());
    let completed_at: Option<String> = row.get(10)?;

    Ok(Reminder {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        time: row.get(3)?,
        date,
        is_daily: row.get(5)?,
        kind: ReminderKind::parse(&kind_str),
        priority: Priority::parse(&priority_str),
        notes: row.get(8)?,
        completed: row.get(9)?,
        completed_at: parse_optional_datetime(completed_at),
        created_at: parse_datetime_fallback(&row.get::<_, String>(11)?),
        updated_at: parse_datetime_fallback(&row.get::<_, String>(12)?),
    })
}

const REMINDER_COLUMNS: &str = "id, user_id, name, time, date, is_daily, kind, priority, notes, \
     completed, completed_at, created_at, updated_at";

/// Build a User from a database row. Nested state lives in JSON columns.
fn row_to_user(row: &rusqlite::Row) -> std::result::Result<User, rusqlite::Error> {
    let settings_json: String = row.get(4)?;
    let stats_json: String = row.get(5)?;
    let achievements_json: String = row.get(6)?;
    let filters_json: String = row.get(7)?;

    let settings: UserSettings = serde_json::from_str(&settings_json).unwrap_or_default();
    let stats: UserStats = serde_json::from_str(&stats_json).unwrap_or_default();
    let achievements: Vec<AchievementRecord> =
        serde_json::from_str(&achievements_json).unwrap_or_default();
    let saved_filters: Vec<SavedFilter> = serde_json::from_str(&filters_json).unwrap_or_default();

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        settings,
        stats,
        achievements,
        saved_filters,
        created_at: parse_datetime_fallback(&row.get::<_, String>(8)?),
    })
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, settings, stats, achievements, saved_filters, created_at";

/// SQLite object store backing every component of the core.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `~/.config/remindful/remindful.db`.
    ///
    /// Creates the database file and schema if they don't exist; reopening
    /// an existing store reuses the schema.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("remindful.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id            INTEGER PRIMARY KEY AUTOINCREMENT,
                    username      TEXT NOT NULL UNIQUE,
                    email         TEXT NOT NULL UNIQUE,
                    password_hash TEXT NOT NULL,
                    settings      TEXT NOT NULL DEFAULT '{}',
                    stats         TEXT NOT NULL DEFAULT '{}',
                    achievements  TEXT NOT NULL DEFAULT '[]',
                    saved_filters TEXT NOT NULL DEFAULT '[]',
                    created_at    TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS reminders (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id      INTEGER NOT NULL REFERENCES users(id),
                    name         TEXT NOT NULL,
                    time         TEXT NOT NULL,
                    date         TEXT,
                    is_daily     INTEGER NOT NULL DEFAULT 0,
                    kind         TEXT NOT NULL DEFAULT 'medicine',
                    priority     TEXT NOT NULL DEFAULT 'medium',
                    notes        TEXT NOT NULL DEFAULT '',
                    completed    INTEGER NOT NULL DEFAULT 0,
                    completed_at TEXT,
                    created_at   TEXT NOT NULL,
                    updated_at   TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS sessions (
                    key     TEXT PRIMARY KEY,
                    user_id INTEGER NOT NULL
                );

                CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users(username);
                CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);
                CREATE INDEX IF NOT EXISTS idx_reminders_user_id ON reminders(user_id);
                CREATE INDEX IF NOT EXISTS idx_reminders_date ON reminders(date);
                CREATE INDEX IF NOT EXISTS idx_reminders_completed ON reminders(completed);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Run `body` inside a single transaction: all writes commit together
    /// or are rolled back together. Failures surface unchanged -- no retry.
    pub fn with_tx<T>(&self, body: impl FnOnce(&Store) -> Result<T>) -> Result<T> {
        self.conn
            .execute_batch("BEGIN IMMEDIATE TRANSACTION;")
            .map_err(StorageError::from)?;
        match body(self) {
            Ok(value) => {
                self.conn
                    .execute_batch("COMMIT;")
                    .map_err(StorageError::from)?;
                Ok(value)
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err)
            }
        }
    }

    // === Users ===

    /// Insert a new user. Uniqueness of username and email is enforced by
    /// the engine: a constraint violation maps to `CoreError::Conflict`.
    pub fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        settings: &UserSettings,
        stats: &UserStats,
        created_at: DateTime<Utc>,
    ) -> Result<UserId> {
        let settings_json = serde_json::to_string(settings)?;
        let stats_json = serde_json::to_string(stats)?;

        let result = self.conn.execute(
            "INSERT INTO users (username, email, password_hash, settings, stats, achievements, saved_filters, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, '[]', '[]', ?6)",
            params![
                username,
                email,
                password_hash,
                settings_json,
                stats_json,
                created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, Some(msg)))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                if msg.contains("users.username") {
                    Err(CoreError::Conflict("username already exists".to_string()))
                } else if msg.contains("users.email") {
                    Err(CoreError::Conflict("email already exists".to_string()))
                } else {
                    Err(StorageError::QueryFailed(msg).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by id.
    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
        Ok(stmt.query_row(params![id], row_to_user).optional()?)
    }

    /// Get a user by username, via the unique index.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
        ))?;
        Ok(stmt.query_row(params![username], row_to_user).optional()?)
    }

    /// Write back a user's mutable state (settings, stats, achievements,
    /// saved filters). Identity fields are immutable.
    pub fn update_user(&self, user: &User) -> Result<()> {
        let settings_json = serde_json::to_string(&user.settings)?;
        let stats_json = serde_json::to_string(&user.stats)?;
        let achievements_json = serde_json::to_string(&user.achievements)?;
        let filters_json = serde_json::to_string(&user.saved_filters)?;

        self.conn.execute(
            "UPDATE users
             SET settings = ?1, stats = ?2, achievements = ?3, saved_filters = ?4
             WHERE id = ?5",
            params![
                settings_json,
                stats_json,
                achievements_json,
                filters_json,
                user.id,
            ],
        )?;
        Ok(())
    }

    // === Reminders ===

    /// Insert a reminder owned by `user_id`. Stamps created/updated times.
    pub fn insert_reminder(
        &self,
        user_id: UserId,
        data: &NewReminder,
        now: DateTime<Utc>,
    ) -> Result<ReminderId> {
        self.conn.execute(
            "INSERT INTO reminders (user_id, name, time, date, is_daily, kind, priority, notes, completed, completed_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, NULL, ?9, ?9)",
            params![
                user_id,
                data.name,
                data.time,
                data.date.map(|d| d.format("%Y-%m-%d").to_string()),
                data.is_daily,
                data.kind.as_str(),
                data.priority.as_str(),
                data.notes,
                now.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a reminder by id.
    pub fn get_reminder(&self, id: ReminderId) -> Result<Option<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = ?1"
        ))?;
        Ok(stmt.query_row(params![id], row_to_reminder).optional()?)
    }

    /// List all reminders owned by `user_id`, via the user_id index,
    /// in insertion order.
    pub fn list_reminders_for_user(&self, user_id: UserId) -> Result<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE user_id = ?1 ORDER BY id ASC"
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_reminder)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Write back a full reminder record.
    pub fn update_reminder(&self, reminder: &Reminder) -> Result<()> {
        self.conn.execute(
            "UPDATE reminders
             SET name = ?1, time = ?2, date = ?3, is_daily = ?4, kind = ?5, priority = ?6,
                 notes = ?7, completed = ?8, completed_at = ?9, updated_at = ?10
             WHERE id = ?11",
            params![
                reminder.name,
                reminder.time,
                reminder.date.map(|d| d.format("%Y-%m-%d").to_string()),
                reminder.is_daily,
                reminder.kind.as_str(),
                reminder.priority.as_str(),
                reminder.notes,
                reminder.completed,
                reminder.completed_at.map(|dt| dt.to_rfc3339()),
                reminder.updated_at.to_rfc3339(),
                reminder.id,
            ],
        )?;
        Ok(())
    }

    /// Delete a reminder by id.
    pub fn delete_reminder(&self, id: ReminderId) -> Result<()> {
        self.conn
            .execute("DELETE FROM reminders WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Delete every reminder owned by `user_id`; returns the count deleted.
    pub fn delete_reminders_for_user(&self, user_id: UserId) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM reminders WHERE user_id = ?1", params![user_id])?;
        Ok(deleted)
    }

    // === Session ===

    /// Read the current session pointer.
    pub fn session_get(&self) -> Result<Option<UserId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id FROM sessions WHERE key = ?1")?;
        Ok(stmt
            .query_row(params![SESSION_KEY], |row| row.get::<_, UserId>(0))
            .optional()?)
    }

    /// Set the current session pointer.
    pub fn session_set(&self, user_id: UserId) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sessions (key, user_id) VALUES (?1, ?2)",
            params![SESSION_KEY, user_id],
        )?;
        Ok(())
    }

    /// Clear the session pointer. Never fails from the caller's view of
    /// logout: deleting an absent row is a no-op.
    pub fn session_clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM sessions WHERE key = ?1", params![SESSION_KEY])?;
        Ok(())
    }
}
