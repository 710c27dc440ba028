//! Credential store: registered users and the current session record.

use domain::models::User;
use std::sync::Arc;

use crate::entities::UserEntity;
use crate::metrics::record_corrupt_value;
use crate::store::{get_json, set_json, KeyValueStore, StoreError};

/// Key holding the array of registered users.
pub const USERS_KEY: &str = "users";
/// Key holding the current-session user.
pub const CURRENT_USER_KEY: &str = "user";
/// Placeholder key cleared on logout.
pub const TOKEN_KEY: &str = "token";

/// Repository for the persisted user list and session slot.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns every registered user, in registration order.
    pub fn list_users(&self) -> Result<Vec<UserEntity>, StoreError> {
        Ok(get_json(self.store.as_ref(), USERS_KEY)?.unwrap_or_default())
    }

    /// Find a registered user by exact email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, StoreError> {
        Ok(self.list_users()?.into_iter().find(|u| u.email == email))
    }

    pub fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_email(email)?.is_some())
    }

    /// Appends a user. Uniqueness is the caller's responsibility.
    pub fn append_user(&self, user: UserEntity) -> Result<(), StoreError> {
        let mut users = self.list_users()?;
        users.push(user);
        set_json(self.store.as_ref(), USERS_KEY, &users)
    }

    /// Removes the user with `uid`, if present.
    pub fn remove_user(&self, uid: &str) -> Result<(), StoreError> {
        let mut users = self.list_users()?;
        let before = users.len();
        users.retain(|u| u.uid != uid);
        if users.len() == before {
            return Ok(());
        }
        set_json(self.store.as_ref(), USERS_KEY, &users)
    }

    /// Reads the current-session record.
    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        get_json(self.store.as_ref(), CURRENT_USER_KEY)
    }

    /// Reads the current-session record at startup.
    ///
    /// A malformed record is logged, cleared and treated as no session.
    pub fn restore_session(&self) -> Result<Option<User>, StoreError> {
        match self.current_user() {
            Ok(user) => Ok(user),
            Err(StoreError::Corrupt { key, source }) => {
                tracing::warn!(key = %key, error = %source, "Discarding malformed session record");
                record_corrupt_value(&key);
                self.store.remove(CURRENT_USER_KEY)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn set_current_user(&self, user: &User) -> Result<(), StoreError> {
        set_json(self.store.as_ref(), CURRENT_USER_KEY, user)
    }

    /// Removes the token placeholder and then the session record, so a
    /// failure leaves the session record in place.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(CURRENT_USER_KEY)
    }
}
