//! Repository implementations over the key-value store.

pub mod credential;
pub mod preference;

pub use credential::{CredentialStore, CURRENT_USER_KEY, TOKEN_KEY, USERS_KEY};
pub use preference::{PreferenceRepository, LANGUAGE_KEY};
