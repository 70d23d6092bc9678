//! The single "current user" pointer.
//!
//! Backed by one row in the sessions table. Every call re-reads the store:
//! multiple logical callers may observe the pointer, so caching a value
//! across calls is not assumed correct.

use crate::error::Result;
use crate::model::UserId;
use crate::storage::Store;

/// Resolves, sets, and clears the active session.
pub struct SessionManager<'a> {
    store: &'a Store,
}

impl<'a> SessionManager<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The active user id, or None when logged out.
    pub fn current_user_id(&self) -> Result<Option<UserId>> {
        self.store.session_get()
    }

    pub fn set_current_user(&self, user_id: UserId) -> Result<()> {
        self.store.session_set(user_id)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.session_clear()
    }
}
