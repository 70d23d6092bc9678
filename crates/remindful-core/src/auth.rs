//! Registration, login, and logout.
//!
//! Passwords are stored as salted bcrypt hashes; the stored credential is
//! never reversible. Uniqueness of username/email is a property of the
//! insert itself (engine-level unique index), not a read-then-write check,
//! so a racing second registration is rejected rather than admitted.

use chrono::Utc;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::model::{User, UserId, UserSettings, UserStats};
use crate::session::SessionManager;
use crate::storage::Store;

/// Account registration and credential verification, backed by the store.
pub struct AuthGateway<'a> {
    store: &'a Store,
    session: SessionManager<'a>,
    bcrypt_cost: u32,
}

impl<'a> AuthGateway<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self::with_cost(store, bcrypt::DEFAULT_COST)
    }

    /// Use a custom bcrypt cost. Tests use the minimum cost to stay fast.
    pub fn with_cost(store: &'a Store, bcrypt_cost: u32) -> Self {
        Self {
            store,
            session: SessionManager::new(store),
            bcrypt_cost,
        }
    }

    /// Create an account with default settings and stats, then activate
    /// the session for it.
    ///
    /// # Errors
    /// `Conflict` when the username or email is already taken.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<UserId> {
        let password_hash = bcrypt::hash(password, self.bcrypt_cost)?;
        let user_id = self.store.insert_user(
            username,
            email,
            &password_hash,
            &UserSettings::default(),
            &UserStats::default(),
            Utc::now(),
        )?;
        self.session.set_current_user(user_id)?;
        debug!(user_id, username, "registered user");
        Ok(user_id)
    }

    /// Verify credentials and activate the session.
    ///
    /// # Errors
    /// `NotFound` for an unknown username, `Unauthenticated` for a wrong
    /// password.
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .store
            .get_user_by_username(username)?
            .ok_or(CoreError::NotFound)?;

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(CoreError::Unauthenticated);
        }

        self.session.set_current_user(user.id)?;
        debug!(user_id = user.id, username, "logged in");
        Ok(user)
    }

    /// Clear the session unconditionally. Logging out while logged out
    /// is a no-op.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_sets_session_and_defaults() {
        let store = Store::open_memory().unwrap();
        let auth = AuthGateway::with_cost(&store, 4);

        let id = auth
            .register("alice", "alice@example.com", "hunter2")
            .unwrap();
        assert_eq!(store.session_get().unwrap(), Some(id));

        let user = store.get_user(id).unwrap().unwrap();
        assert_eq!(user.stats.points, 0);
        assert_eq!(user.settings.water_reminder_interval, 60);
        // The credential is not stored in plaintext.
        assert_ne!(user.password_hash, "hunter2");
    }

    #[test]
    fn duplicate_username_rejected() {
        let store = Store::open_memory().unwrap();
        let auth = AuthGateway::with_cost(&store, 4);
        auth.register("alice", "alice@example.com", "pw").unwrap();

        let err = auth
            .register("alice", "alice2@example.com", "pw")
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn duplicate_email_rejected() {
        let store = Store::open_memory().unwrap();
        let auth = AuthGateway::with_cost(&store, 4);
        auth.register("alice", "alice@example.com", "pw").unwrap();

        let err = auth
            .register("alicia", "alice@example.com", "pw")
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn login_verifies_password() {
        let store = Store::open_memory().unwrap();
        let auth = AuthGateway::with_cost(&store, 4);
        auth.register("alice", "alice@example.com", "hunter2")
            .unwrap();
        auth.logout().unwrap();

        let err = auth.login("alice", "wrong").unwrap_err();
        assert!(matches!(err, CoreError::Unauthenticated));
        assert!(store.session_get().unwrap().is_none());

        let user = auth.login("alice", "hunter2").unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(store.session_get().unwrap(), Some(user.id));
    }

    #[test]
    fn login_unknown_user_is_not_found() {
        let store = Store::open_memory().unwrap();
        let auth = AuthGateway::with_cost(&store, 4);
        let err = auth.login("ghost", "pw").unwrap_err();
        assert!(matches!(err, CoreError::NotFound));
    }

    #[test]
    fn logout_is_unconditional() {
        let store = Store::open_memory().unwrap();
        let auth = AuthGateway::with_cost(&store, 4);
        auth.logout().unwrap();
        auth.logout().unwrap();
    }
}
