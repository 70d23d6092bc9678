//! Session-scoped reminder and user-state operations.
//!
//! Every operation resolves the current user first and scopes reads and
//! writes to that owner. A reminder owned by someone else is
//! indistinguishable from one that does not exist.

use chrono::Utc;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::model::{
    AchievementRecord, NewReminder, Reminder, ReminderId, ReminderPatch, SavedFilter,
    SettingsPatch, User, UserId, UserStats,
};
use crate::session::SessionManager;
use crate::storage::Store;

/// Reminder CRUD plus per-user state updates, scoped to the session user.
pub struct ReminderRepo<'a> {
    store: &'a Store,
    session: SessionManager<'a>,
}

impl<'a> ReminderRepo<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            session: SessionManager::new(store),
        }
    }

    fn require_user(&self) -> Result<UserId> {
        self.session
            .current_user_id()?
            .ok_or(CoreError::Unauthenticated)
    }

    /// Fetch a reminder and verify the session user owns it.
    fn owned_reminder(&self, id: ReminderId, user_id: UserId) -> Result<Reminder> {
        match self.store.get_reminder(id)? {
            Some(reminder) if reminder.user_id == user_id => Ok(reminder),
            _ => Err(CoreError::NotFound),
        }
    }

    /// All reminders owned by the current user, in insertion order.
    pub fn list(&self) -> Result<Vec<Reminder>> {
        let user_id = self.require_user()?;
        self.store.list_reminders_for_user(user_id)
    }

    /// Create a reminder for the current user.
    pub fn create(&self, data: &NewReminder) -> Result<ReminderId> {
        let user_id = self.require_user()?;
        let id = self.store.insert_reminder(user_id, data, Utc::now())?;
        debug!(reminder_id = id, user_id, "created reminder");
        Ok(id)
    }

    /// Merge a patch into a reminder and refresh `updated_at`.
    ///
    /// # Errors
    /// `NotFound` when the id is absent or owned by a different user.
    pub fn update(&self, id: ReminderId, patch: &ReminderPatch) -> Result<Reminder> {
        let user_id = self.require_user()?;
        self.store.with_tx(|store| {
            let mut reminder = self.owned_reminder(id, user_id)?;
            patch.apply(&mut reminder);
            reminder.updated_at = Utc::now();
            store.update_reminder(&reminder)?;
            Ok(reminder)
        })
    }

    /// Flip `completed`, stamping or clearing `completed_at` to match.
    /// Returns the updated record so the caller can feed the gamification
    /// engine and the scheduler.
    pub fn toggle(&self, id: ReminderId) -> Result<Reminder> {
        let user_id = self.require_user()?;
        self.store.with_tx(|store| {
            let mut reminder = self.owned_reminder(id, user_id)?;
            let now = Utc::now();
            reminder.completed = !reminder.completed;
            reminder.completed_at = reminder.completed.then_some(now);
            reminder.updated_at = now;
            store.update_reminder(&reminder)?;
            Ok(reminder)
        })
    }

    /// Delete one reminder, with the same ownership check as `update`.
    pub fn delete(&self, id: ReminderId) -> Result<()> {
        let user_id = self.require_user()?;
        self.store.with_tx(|store| {
            self.owned_reminder(id, user_id)?;
            store.delete_reminder(id)
        })?;
        debug!(reminder_id = id, user_id, "deleted reminder");
        Ok(())
    }

    /// Delete every reminder the current user owns; returns the count.
    pub fn delete_all(&self) -> Result<usize> {
        let user_id = self.require_user()?;
        let deleted = self
            .store
            .with_tx(|store| store.delete_reminders_for_user(user_id))?;
        debug!(user_id, deleted, "cleared reminders");
        Ok(deleted)
    }

    /// The full record for the current user.
    pub fn current_user(&self) -> Result<User> {
        let user_id = self.require_user()?;
        self.store.get_user(user_id)?.ok_or(CoreError::NotFound)
    }

    /// Apply a settings patch and write the user back.
    pub fn update_settings(&self, patch: &SettingsPatch) -> Result<User> {
        self.store.with_tx(|store| {
            let mut user = self.current_user()?;
            patch.apply(&mut user.settings);
            store.update_user(&user)?;
            Ok(user)
        })
    }

    /// Replace the user's stats blob wholesale.
    pub fn update_stats(&self, stats: &UserStats) -> Result<()> {
        self.store.with_tx(|store| {
            let mut user = self.current_user()?;
            user.stats = stats.clone();
            store.update_user(&user)
        })
    }

    /// Record an unlocked achievement.
    ///
    /// # Errors
    /// `Conflict` when the achievement id is already present.
    pub fn add_achievement(&self, record: &AchievementRecord) -> Result<()> {
        self.store.with_tx(|store| {
            let mut user = self.current_user()?;
            if user.achievements.iter().any(|a| a.id == record.id) {
                return Err(CoreError::Conflict(format!(
                    "achievement {} already unlocked",
                    record.id
                )));
            }
            user.achievements.push(record.clone());
            store.update_user(&user)
        })
    }

    /// Save a filter preset on the user record. A preset with the same id
    /// is replaced.
    pub fn save_filter(&self, preset: &SavedFilter) -> Result<()> {
        self.store.with_tx(|store| {
            let mut user = self.current_user()?;
            user.saved_filters.retain(|f| f.id != preset.id);
            user.saved_filters.push(preset.clone());
            store.update_user(&user)
        })
    }

    /// Persist the outcome of a gamification transition: the reminder's
    /// new completion state is already in the store, this writes the
    /// user's updated stats and achievements.
    pub fn persist_user(&self, user: &User) -> Result<()> {
        self.store.with_tx(|store| store.update_user(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthGateway;
    use crate::model::{Priority, ReminderKind};

    fn new_reminder(name: &str) -> NewReminder {
        NewReminder {
            name: name.to_string(),
            time: "08:00".to_string(),
            date: None,
            is_daily: true,
            kind: ReminderKind::Medicine,
            priority: Priority::Medium,
            notes: String::new(),
        }
    }

    fn store_with_user(username: &str) -> Store {
        let store = Store::open_memory().unwrap();
        AuthGateway::with_cost(&store, 4)
            .register(username, &format!("{username}@example.com"), "pw")
            .unwrap();
        store
    }

    #[test]
    fn operations_require_a_session() {
        let store = Store::open_memory().unwrap();
        let repo = ReminderRepo::new(&store);
        assert!(matches!(repo.list(), Err(CoreError::Unauthenticated)));
        assert!(matches!(
            repo.create(&new_reminder("Aspirin")),
            Err(CoreError::Unauthenticated)
        ));
    }

    #[test]
    fn create_list_round_trip() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);

        let id = repo.create(&new_reminder("Aspirin")).unwrap();
        let reminders = repo.list().unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].id, id);
        assert_eq!(reminders[0].name, "Aspirin");
        assert!(!reminders[0].completed);
    }

    #[test]
    fn toggle_sets_and_clears_completed_at() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);
        let id = repo.create(&new_reminder("Aspirin")).unwrap();

        let reminder = repo.toggle(id).unwrap();
        assert!(reminder.completed);
        assert!(reminder.completed_at.is_some());

        let reminder = repo.toggle(id).unwrap();
        assert!(!reminder.completed);
        assert!(reminder.completed_at.is_none());
    }

    #[test]
    fn other_users_reminders_are_invisible() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);
        let alice_reminder = repo.create(&new_reminder("Aspirin")).unwrap();

        let auth = AuthGateway::with_cost(&store, 4);
        auth.register("bob", "bob@example.com", "pw").unwrap();
        let repo = ReminderRepo::new(&store);

        assert!(repo.list().unwrap().is_empty());
        assert!(matches!(
            repo.update(alice_reminder, &ReminderPatch::default()),
            Err(CoreError::NotFound)
        ));
        assert!(matches!(
            repo.delete(alice_reminder),
            Err(CoreError::NotFound)
        ));

        // Alice's reminder survives untouched.
        auth.login("alice", "pw").unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);
        let first = repo.create(&new_reminder("Aspirin")).unwrap();
        let second = repo.create(&new_reminder("Walk")).unwrap();

        repo.delete(first).unwrap();

        let remaining = repo.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
        // Deleting again reports the record as gone.
        assert!(matches!(repo.delete(first), Err(CoreError::NotFound)));
    }

    #[test]
    fn delete_all_counts_and_isolates() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);
        for i in 0..5 {
            repo.create(&new_reminder(&format!("r{i}"))).unwrap();
        }

        let auth = AuthGateway::with_cost(&store, 4);
        auth.register("bob", "bob@example.com", "pw").unwrap();
        repo.create(&new_reminder("bob's")).unwrap();

        auth.login("alice", "pw").unwrap();
        assert_eq!(repo.delete_all().unwrap(), 5);
        assert!(repo.list().unwrap().is_empty());

        auth.login("bob", "pw").unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn update_patch_refreshes_updated_at() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);
        let id = repo.create(&new_reminder("Aspirin")).unwrap();

        let patch = ReminderPatch {
            name: Some("Ibuprofen".to_string()),
            priority: Some(Priority::High),
            ..Default::default()
        };
        let updated = repo.update(id, &patch).unwrap();
        assert_eq!(updated.name, "Ibuprofen");
        assert_eq!(updated.priority, Priority::High);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn settings_patch_persists() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);

        let patch = SettingsPatch {
            theme: Some("forest".to_string()),
            notification_volume: Some(80),
            ..Default::default()
        };
        let user = repo.update_settings(&patch).unwrap();
        assert_eq!(user.settings.theme, "forest");

        let reloaded = repo.current_user().unwrap();
        assert_eq!(reloaded.settings.notification_volume, 80);
        // Unpatched fields keep their defaults.
        assert_eq!(reloaded.settings.font_size, "medium");
    }

    #[test]
    fn duplicate_achievement_is_a_conflict() {
        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);

        let record = AchievementRecord {
            id: "first_task".to_string(),
            name: "Getting Started".to_string(),
            description: "Complete your first task".to_string(),
            icon: "🎯".to_string(),
            unlocked_at: Utc::now(),
        };
        repo.add_achievement(&record).unwrap();
        assert!(matches!(
            repo.add_achievement(&record),
            Err(CoreError::Conflict(_))
        ));
        assert_eq!(repo.current_user().unwrap().achievements.len(), 1);
    }

    #[test]
    fn save_filter_replaces_same_id() {
        use crate::filter::ReminderFilter;

        let store = store_with_user("alice");
        let repo = ReminderRepo::new(&store);

        let preset = SavedFilter {
            id: "f1".to_string(),
            name: "meds".to_string(),
            filter: ReminderFilter {
                kind: Some(ReminderKind::Medicine),
                ..Default::default()
            },
        };
        repo.save_filter(&preset).unwrap();

        let renamed = SavedFilter {
            name: "medicine only".to_string(),
            ..preset
        };
        repo.save_filter(&renamed).unwrap();

        let user = repo.current_user().unwrap();
        assert_eq!(user.saved_filters.len(), 1);
        assert_eq!(user.saved_filters[0].name, "medicine only");
    }
}
