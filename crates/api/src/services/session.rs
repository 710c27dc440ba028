//! Session manager: login, registration, logout and the current session.

use domain::models::{AuthError, ProfileForm, User};
use persistence::entities::UserEntity;
use persistence::repositories::CredentialStore;
use persistence::StoreError;
use shared::validation::{check_password_strength, is_valid_email, PasswordRule};
use std::sync::Mutex;
use tokio::sync::watch;
use uuid::Uuid;

use crate::middleware::metrics::record_auth_event;

fn storage_error(err: StoreError) -> AuthError {
    AuthError::Storage(err.to_string())
}

/// Owns the authentication lifecycle.
///
/// The session is either anonymous (`None`) or holds the password-free
/// record of the logged-in user. Every state change is written to the
/// credential store first and then published to subscribers.
pub struct SessionManager {
    credentials: CredentialStore,
    session: watch::Sender<Option<User>>,
    /// Serializes read-modify-write sequences against the store.
    write_lock: Mutex<()>,
}

impl SessionManager {
    /// Restores the persisted session, if any.
    pub fn new(credentials: CredentialStore) -> Result<Self, StoreError> {
        let restored = credentials.restore_session()?;
        match &restored {
            Some(user) => tracing::info!(uid = %user.uid, "Restored persisted session"),
            None => tracing::debug!("No persisted session, starting anonymous"),
        }

        Ok(Self {
            credentials,
            session: watch::Sender::new(restored),
            write_lock: Mutex::new(()),
        })
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Receiver notified on every login, registration, logout and profile update.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session.subscribe()
    }

    pub fn validate_email(&self, email: &str) -> bool {
        is_valid_email(email)
    }

    pub fn validate_password(&self, password: &str) -> Result<(), PasswordRule> {
        check_password_strength(password)
    }

    pub fn is_email_registered(&self, email: &str) -> Result<bool, AuthError> {
        self.credentials.email_exists(email).map_err(storage_error)
    }

    /// Logs in with an exact email and password match.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let result = self.try_login(email, password);
        match &result {
            Ok(user) => {
                record_auth_event("login", "success");
                tracing::info!(uid = %user.uid, "User logged in");
            }
            Err(e) => {
                record_auth_event("login", e.code());
                tracing::info!(reason = e.code(), "Login rejected");
            }
        }
        result
    }

    fn try_login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if !is_valid_email(email) {
            return Err(AuthError::EmailInvalid);
        }

        let _guard = self.lock();
        let entity = self
            .credentials
            .list_users()
            .map_err(storage_error)?
            .into_iter()
            .find(|u| u.matches_credentials(email, password))
            .ok_or(AuthError::InvalidCredentials)?;

        let user = User::from(entity);
        self.open_session(user)
    }

    /// Registers a new user and logs them in.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError> {
        let result = self.try_register(email, password, display_name);
        match &result {
            Ok(user) => {
                record_auth_event("register", "success");
                tracing::info!(uid = %user.uid, "User registered");
            }
            Err(e) => {
                record_auth_event("register", e.code());
                tracing::info!(reason = e.code(), "Registration rejected");
            }
        }
        result
    }

    fn try_register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError> {
        if !is_valid_email(email) {
            return Err(AuthError::EmailInvalid);
        }
        check_password_strength(password)?;

        let _guard = self.lock();
        if self.credentials.email_exists(email).map_err(storage_error)? {
            return Err(AuthError::EmailExists);
        }

        let entity = UserEntity {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        };
        self.credentials
            .append_user(entity.clone())
            .map_err(storage_error)?;

        let uid = entity.uid.clone();
        self.open_session(User::from(entity)).inspect_err(|_| {
            // The user must not stay registered when the session could not be opened.
            if let Err(e) = self.credentials.remove_user(&uid) {
                tracing::error!(uid = %uid, error = %e, "Failed to roll back registration");
            }
        })
    }

    /// Clears the session.
    ///
    /// Only a failed store write can make this fail, and then the session
    /// stays open both in memory and on disk.
    pub fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.lock();
        if let Err(e) = self.credentials.clear_session() {
            record_auth_event("logout", "storage_error");
            tracing::error!(error = %e, "Failed to clear persisted session, keeping it open");
            return Err(storage_error(e));
        }

        let previous = self.session.send_replace(None);
        record_auth_event("logout", "success");
        match previous {
            Some(user) => tracing::info!(uid = %user.uid, "User logged out"),
            None => tracing::debug!("Logout while anonymous"),
        }
        Ok(())
    }

    /// Rewrites the current-session record from the settings form.
    ///
    /// The registered user list is left untouched, so a later login still
    /// sees the old profile. Returns `None` while anonymous.
    pub fn update_profile(&self, form: &ProfileForm) -> Result<Option<User>, AuthError> {
        let _guard = self.lock();
        let Some(current) = self.current_user() else {
            return Ok(None);
        };

        let updated = form.apply_to(&current);
        self.credentials
            .set_current_user(&updated)
            .map_err(storage_error)?;
        self.session.send_replace(Some(updated.clone()));

        tracing::info!(uid = %updated.uid, "Session profile updated");
        Ok(Some(updated))
    }

    fn open_session(&self, user: User) -> Result<User, AuthError> {
        self.credentials
            .set_current_user(&user)
            .map_err(storage_error)?;
        self.session.send_replace(Some(user.clone()));
        Ok(user)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use persistence::repositories::{CURRENT_USER_KEY, TOKEN_KEY, USERS_KEY};
    use persistence::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    const PASSWORD: &str = "Greenhouse1";

    /// Memory store whose writes to one key can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing_key: Mutex<Option<&'static str>>,
    }

    impl FlakyStore {
        fn fail_writes_to(&self, key: Option<&'static str>) {
            *self.failing_key.lock().unwrap() = key;
        }

        fn check(&self, key: &str) -> Result<(), StoreError> {
            match *self.failing_key.lock().unwrap() {
                Some(failing) if failing == key => Err(StoreError::Poisoned),
                _ => Ok(()),
            }
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.check(key)?;
            self.inner.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>, StoreError> {
            self.inner.keys()
        }
    }

    fn flaky_setup() -> (Arc<FlakyStore>, SessionManager) {
        let store = Arc::new(FlakyStore::default());
        let manager = SessionManager::new(CredentialStore::new(store.clone())).unwrap();
        (store, manager)
    }

    fn setup() -> (Arc<MemoryStore>, SessionManager) {
        let store = Arc::new(MemoryStore::new());
        let manager = SessionManager::new(CredentialStore::new(store.clone())).unwrap();
        (store, manager)
    }

    fn user_count(store: &MemoryStore) -> usize {
        store
            .get(USERS_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str::<Vec<serde_json::Value>>(&raw).unwrap().len())
            .unwrap_or(0)
    }

    #[test]
    fn test_starts_anonymous() {
        let (_, manager) = setup();
        assert!(!manager.is_authenticated());
        assert!(manager.current_user().is_none());
    }

    #[test]
    fn test_register_then_login() {
        let (_, manager) = setup();
        for _ in 0..5 {
            let email: String = SafeEmail().fake();
            let user = manager.register(&email, PASSWORD, "Grower").unwrap();
            assert_eq!(manager.current_user(), Some(user.clone()));

            manager.logout().unwrap();
            let again = manager.login(&email, PASSWORD).unwrap();
            assert_eq!(again.uid, user.uid);
            assert_eq!(again.display_name, "Grower");
            manager.logout().unwrap();
        }
    }

    #[test]
    fn test_register_duplicate_email_leaves_store_unchanged() {
        let (store, manager) = setup();
        manager
            .register("grower@example.com", PASSWORD, "Grower")
            .unwrap();
        manager.logout().unwrap();

        let err = manager
            .register("grower@example.com", "Another123", "Other")
            .unwrap_err();
        assert_eq!(err, AuthError::EmailExists);
        assert_eq!(user_count(&store), 1);
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_register_weak_passwords() {
        let (store, manager) = setup();
        let cases = [
            ("abc", PasswordRule::TooShort),
            ("alllowercase1", PasswordRule::MissingCaseVariety),
            ("ALLUPPER1", PasswordRule::MissingCaseVariety),
            ("NoDigitsHere", PasswordRule::MissingDigit),
            ("Greenhouse1!", PasswordRule::UnsupportedCharacter),
        ];
        for (password, rule) in cases {
            let err = manager
                .register("grower@example.com", password, "Grower")
                .unwrap_err();
            assert_eq!(err, AuthError::PasswordInvalid(rule), "{password}");
        }
        assert_eq!(user_count(&store), 0);
    }

    #[test]
    fn test_register_checks_email_before_password() {
        let (_, manager) = setup();
        let err = manager.register("bad@format", "abc", "Grower").unwrap_err();
        assert_eq!(err, AuthError::EmailInvalid);
    }

    #[test]
    fn test_login_invalid_email_does_not_touch_store() {
        let (store, manager) = setup();
        let err = manager.login("bad@format", "x").unwrap_err();
        assert_eq!(err, AuthError::EmailInvalid);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_login_wrong_password() {
        let (_, manager) = setup();
        manager
            .register("grower@example.com", PASSWORD, "Grower")
            .unwrap();
        manager.logout().unwrap();

        let err = manager.login("grower@example.com", "Wrong1234").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_session_never_holds_password() {
        let (store, manager) = setup();
        manager
            .register("grower@example.com", PASSWORD, "Grower")
            .unwrap();
        let raw = store.get(CURRENT_USER_KEY).unwrap().unwrap();
        assert!(!raw.contains("password"));
        assert!(!raw.contains(PASSWORD));
    }

    #[test]
    fn test_logout_clears_persisted_state() {
        let (store, manager) = setup();
        manager
            .register("grower@example.com", PASSWORD, "Grower")
            .unwrap();
        store.set(TOKEN_KEY, "\"t\"".to_string()).unwrap();

        manager.logout().unwrap();
        assert!(manager.current_user().is_none());
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_none());
        assert!(store.get(TOKEN_KEY).unwrap().is_none());

        // Logging out twice is harmless.
        manager.logout().unwrap();
    }

    #[test]
    fn test_register_rolls_back_when_session_write_fails() {
        let (store, manager) = flaky_setup();
        store.fail_writes_to(Some(CURRENT_USER_KEY));

        let err = manager
            .register("a@b.co", PASSWORD, "Grower")
            .unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert!(!manager.is_authenticated());
        assert_eq!(user_count(&store.inner), 0);
        assert!(!manager.is_email_registered("a@b.co").unwrap());

        store.fail_writes_to(None);
        let user = manager.register("a@b.co", PASSWORD, "Grower").unwrap();
        assert_eq!(manager.current_user(), Some(user));
        assert_eq!(user_count(&store.inner), 1);
    }

    #[test]
    fn test_failed_logout_keeps_session_open() {
        let (store, manager) = flaky_setup();
        let user = manager.register("a@b.co", PASSWORD, "Grower").unwrap();
        let mut rx = manager.subscribe();
        let _ = rx.borrow_and_update();

        store.fail_writes_to(Some(CURRENT_USER_KEY));
        let err = manager.logout().unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert_eq!(manager.current_user(), Some(user.clone()));
        assert!(!rx.has_changed().unwrap());

        let restarted = SessionManager::new(CredentialStore::new(store.clone())).unwrap();
        assert_eq!(restarted.current_user(), Some(user));

        store.fail_writes_to(None);
        manager.logout().unwrap();
        assert!(!manager.is_authenticated());
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_session_restored_on_restart() {
        let (store, manager) = setup();
        let user = manager
            .register("grower@example.com", PASSWORD, "Grower")
            .unwrap();
        drop(manager);

        let restarted = SessionManager::new(CredentialStore::new(store)).unwrap();
        assert_eq!(restarted.current_user(), Some(user));
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let (_, manager) = setup();
        let mut rx = manager.subscribe();
        assert!(rx.borrow_and_update().is_none());

        manager
            .register("grower@example.com", PASSWORD, "Grower")
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_some());

        manager.logout().unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_update_profile_touches_session_only() {
        let (_, manager) = setup();
        assert_eq!(manager.update_profile(&ProfileForm::default()).unwrap(), None);

        let user = manager
            .register("grower@example.com", PASSWORD, "Grower")
            .unwrap();
        let form = ProfileForm {
            first_name: "Leyla".to_string(),
            last_name: "Aliyeva".to_string(),
            email: "leyla@example.com".to_string(),
            phone: "+994501112233".to_string(),
        };
        let updated = manager.update_profile(&form).unwrap().unwrap();
        assert_eq!(updated.uid, user.uid);
        assert_eq!(updated.display_name, "Leyla Aliyeva");
        assert_eq!(manager.current_user(), Some(updated));

        // The registered record keeps the original email.
        assert!(manager.is_email_registered("grower@example.com").unwrap());
        assert!(!manager.is_email_registered("leyla@example.com").unwrap());
    }

    #[test]
    fn test_predicates() {
        let (_, manager) = setup();
        assert!(manager.validate_email("a@b.co"));
        assert!(!manager.validate_email("a@b"));
        assert!(manager.validate_password(PASSWORD).is_ok());
        assert_eq!(
            manager.validate_password("short"),
            Err(PasswordRule::TooShort)
        );
    }
}
