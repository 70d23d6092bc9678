//! Domain records: users, reminders, and their nested state.
//!
//! Ids are engine-assigned SQLite rowids. Nested user state (settings,
//! stats, achievements, saved filters) round-trips through JSON columns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ReminderId = i64;

/// Reminder category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Medicine,
    Task,
    Exercise,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Medicine => "medicine",
            ReminderKind::Task => "task",
            ReminderKind::Exercise => "exercise",
        }
    }

    pub fn parse(s: &str) -> ReminderKind {
        match s {
            "task" => ReminderKind::Task,
            "exercise" => ReminderKind::Exercise,
            _ => ReminderKind::Medicine,
        }
    }
}

/// Reminder priority. Drives the points awarded on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Points awarded when a reminder of this priority is completed.
    pub fn points(&self) -> u32 {
        match self {
            Priority::High => 15,
            Priority::Medium => 10,
            Priority::Low => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Priority {
        match s {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

/// A schedulable reminder, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub user_id: UserId,
    pub name: String,
    /// Wall-clock firing time, 24-hour "HH:MM".
    pub time: String,
    /// Calendar date the reminder applies to; ignored when `is_daily`.
    pub date: Option<NaiveDate>,
    pub is_daily: bool,
    pub kind: ReminderKind,
    pub priority: Priority,
    pub notes: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a reminder. Owner and timestamps are
/// stamped by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReminder {
    pub name: String,
    pub time: String,
    pub date: Option<NaiveDate>,
    pub is_daily: bool,
    pub kind: ReminderKind,
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
}

/// Partial update for a reminder. `None` fields are left untouched;
/// `completed_at` uses a nested Option so it can be explicitly cleared.
#[derive(Debug, Clone, Default)]
pub struct ReminderPatch {
    pub name: Option<String>,
    pub time: Option<String>,
    pub date: Option<Option<NaiveDate>>,
    pub is_daily: Option<bool>,
    pub kind: Option<ReminderKind>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl ReminderPatch {
    /// Merge this patch into a reminder record.
    pub fn apply(&self, reminder: &mut Reminder) {
        if let Some(ref name) = self.name {
            reminder.name = name.clone();
        }
        if let Some(ref time) = self.time {
            reminder.time = time.clone();
        }
        if let Some(date) = self.date {
            reminder.date = date;
        }
        if let Some(is_daily) = self.is_daily {
            reminder.is_daily = is_daily;
        }
        if let Some(kind) = self.kind {
            reminder.kind = kind;
        }
        if let Some(priority) = self.priority {
            reminder.priority = priority;
        }
        if let Some(ref notes) = self.notes {
            reminder.notes = notes.clone();
        }
        if let Some(completed) = self.completed {
            reminder.completed = completed;
        }
        if let Some(completed_at) = self.completed_at {
            reminder.completed_at = completed_at;
        }
    }
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub theme: String,
    pub font_size: String,
    pub high_contrast: bool,
    pub notification_sound: String,
    pub notification_volume: u32,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub water_reminder_enabled: bool,
    /// Water reminder interval in minutes.
    pub water_reminder_interval: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: "ocean".to_string(),
            font_size: "medium".to_string(),
            high_contrast: false,
            notification_sound: "default".to_string(),
            notification_volume: 50,
            email_notifications: false,
            sms_notifications: false,
            water_reminder_enabled: false,
            water_reminder_interval: 60,
        }
    }
}

/// Partial update for user settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub theme: Option<String>,
    pub font_size: Option<String>,
    pub high_contrast: Option<bool>,
    pub notification_sound: Option<String>,
    pub notification_volume: Option<u32>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub water_reminder_enabled: Option<bool>,
    pub water_reminder_interval: Option<u32>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &mut UserSettings) {
        if let Some(ref theme) = self.theme {
            settings.theme = theme.clone();
        }
        if let Some(ref font_size) = self.font_size {
            settings.font_size = font_size.clone();
        }
        if let Some(high_contrast) = self.high_contrast {
            settings.high_contrast = high_contrast;
        }
        if let Some(ref sound) = self.notification_sound {
            settings.notification_sound = sound.clone();
        }
        if let Some(volume) = self.notification_volume {
            settings.notification_volume = volume;
        }
        if let Some(email) = self.email_notifications {
            settings.email_notifications = email;
        }
        if let Some(sms) = self.sms_notifications {
            settings.sms_notifications = sms;
        }
        if let Some(enabled) = self.water_reminder_enabled {
            settings.water_reminder_enabled = enabled;
        }
        if let Some(interval) = self.water_reminder_interval {
            settings.water_reminder_interval = interval;
        }
    }
}

/// Per-user gamification counters.
///
/// `level` is derived: `points / 100 + 1`. `streak` only ever increments
/// (the upstream behavior -- see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub points: u32,
    pub level: u32,
    pub streak: u32,
    pub total_completed: u32,
    pub water_intake: u32,
    pub water_goal: u32,
    /// Days on which the water goal was reached.
    #[serde(default)]
    pub water_days: u32,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            streak: 0,
            total_completed: 0,
            water_intake: 0,
            water_goal: 8,
            water_days: 0,
        }
    }
}

/// An unlocked achievement, as stored on the user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
}

/// A named filter preset saved by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedFilter {
    pub id: String,
    pub name: String,
    pub filter: crate::filter::ReminderFilter,
}

/// A registered user and all account-scoped state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub settings: UserSettings,
    pub stats: UserStats,
    pub achievements: Vec<AchievementRecord>,
    pub saved_filters: Vec<SavedFilter>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_points() {
        assert_eq!(Priority::High.points(), 15);
        assert_eq!(Priority::Medium.points(), 10);
        assert_eq!(Priority::Low.points(), 5);
    }

    #[test]
    fn default_stats_match_fresh_account() {
        let stats = UserStats::default();
        assert_eq!(stats.points, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.water_goal, 8);
    }

    #[test]
    fn stats_blob_without_water_days_still_parses() {
        // Older user blobs predate the water_days counter.
        let json = r#"{"points":30,"level":1,"streak":3,"total_completed":3,"water_intake":2,"water_goal":8}"#;
        let stats: UserStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.points, 30);
        assert_eq!(stats.water_days, 0);
    }

    #[test]
    fn patch_clears_completed_at() {
        let mut reminder = Reminder {
            id: 1,
            user_id: 1,
            name: "Aspirin".to_string(),
            time: "08:00".to_string(),
            date: None,
            is_daily: true,
            kind: ReminderKind::Medicine,
            priority: Priority::High,
            notes: String::new(),
            completed: true,
            completed_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let patch = ReminderPatch {
            completed: Some(false),
            completed_at: Some(None),
            ..Default::default()
        };
        patch.apply(&mut reminder);
        assert!(!reminder.completed);
        assert!(reminder.completed_at.is_none());
    }
}
