//! Authentication errors and login/registration form checks.

use serde::Deserialize;
use shared::validation::PasswordRule;
use thiserror::Error;

/// Errors surfaced by the login/registration flow.
///
/// Every variant maps to a stable message key the presentation layer
/// translates; no variant carries user-facing text of its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Name is required")]
    NameRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid email format")]
    EmailInvalid,

    #[error("Password does not meet requirements: {0}")]
    PasswordInvalid(#[from] PasswordRule),

    #[error("Email already registered")]
    EmailExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Machine-readable error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::EmailRequired => "email_required",
            AuthError::PasswordRequired => "password_required",
            AuthError::NameRequired => "name_required",
            AuthError::PasswordMismatch => "password_mismatch",
            AuthError::EmailInvalid => "email_invalid",
            AuthError::PasswordInvalid(_) => "password_invalid",
            AuthError::EmailExists => "email_exists",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Storage(_) => "storage_error",
        }
    }

    /// Localisation key for the presentation layer.
    pub fn message_key(&self) -> &'static str {
        match self {
            AuthError::EmailRequired => "emailRequired",
            AuthError::PasswordRequired => "passwordRequired",
            AuthError::NameRequired => "nameRequired",
            AuthError::PasswordMismatch => "passwordMismatch",
            AuthError::EmailInvalid => "emailInvalid",
            AuthError::PasswordInvalid(rule) => rule.message_key(),
            AuthError::EmailExists => "emailExists",
            AuthError::InvalidCredentials => "invalidCredentials",
            AuthError::Storage(_) => "storageError",
        }
    }

    /// True for errors caused by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        !matches!(self, AuthError::Storage(_))
    }
}

/// Login form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Empty-field checks done before the session service is called.
    pub fn check(&self) -> Result<(), AuthError> {
        if self.email.is_empty() {
            return Err(AuthError::EmailRequired);
        }
        if self.password.is_empty() {
            return Err(AuthError::PasswordRequired);
        }
        Ok(())
    }
}

/// Registration form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub name: String,
}

impl RegistrationForm {
    /// Empty-field and confirmation checks done before the session service is called.
    pub fn check(&self) -> Result<(), AuthError> {
        if self.email.is_empty() {
            return Err(AuthError::EmailRequired);
        }
        if self.password.is_empty() {
            return Err(AuthError::PasswordRequired);
        }
        if self.name.is_empty() {
            return Err(AuthError::NameRequired);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}
