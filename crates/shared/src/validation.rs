//! Credential validation rules shared by the session service and form checks.

use thiserror::Error;
use validator::ValidationError;

/// Minimum number of characters in an acceptable password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

lazy_static::lazy_static! {
    /// Loose syntactic email check: something@something.something, no whitespace.
    pub static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Reason a password was rejected by the strength policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordRule {
    #[error("Password must be at least 8 characters")]
    TooShort,

    #[error("Password must contain both uppercase and lowercase letters")]
    MissingCaseVariety,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password may only contain letters and digits")]
    UnsupportedCharacter,
}

impl PasswordRule {
    /// Localisation key for this rule.
    pub fn message_key(&self) -> &'static str {
        match self {
            PasswordRule::TooShort => "passwordMinLength",
            PasswordRule::MissingCaseVariety => "passwordCase",
            PasswordRule::MissingDigit => "passwordNumber",
            PasswordRule::UnsupportedCharacter => "passwordInvalid",
        }
    }
}

/// Returns true when `email` passes the syntactic email check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Checks a password against the strength policy.
///
/// Rules are applied in order: length, case variety, digit, character set.
/// The first failing rule is reported.
pub fn check_password_strength(password: &str) -> Result<(), PasswordRule> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordRule::TooShort);
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    if !has_upper || !has_lower {
        return Err(PasswordRule::MissingCaseVariety);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordRule::MissingDigit);
    }

    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PasswordRule::UnsupportedCharacter);
    }

    Ok(())
}

/// `validator` adapter for email fields.
pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("emailInvalid");
        err.message = Some("Invalid email format".into());
        Err(err)
    }
}
