//! UI preference and profile models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::user::User;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Az,
    En,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Az => "az",
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "az" => Ok(Language::Az),
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Profile fields edited on the settings page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[validate(custom(function = "shared::validation::validate_email_format"))]
    pub email: String,

    #[serde(default)]
    pub phone: String,
}

impl ProfileForm {
    /// Pre-fills the form from the session user.
    pub fn from_user(user: &User) -> Self {
        let (first_name, last_name) = user.name_parts();
        Self {
            first_name,
            last_name,
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    /// First and last name joined with a single space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Returns `user` with the profile fields replaced; the uid is kept.
    pub fn apply_to(&self, user: &User) -> User {
        User {
            uid: user.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name(),
            phone: if self.phone.is_empty() {
                None
            } else {
                Some(self.phone.clone())
            },
        }
    }
}

/// Password change request from the settings page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl PasswordChange {
    /// A change is requested when a new password is given and confirmed.
    pub fn is_confirmed(&self) -> bool {
        !self.new_password.is_empty() && self.new_password == self.confirm_password
    }
}

/// Everything the settings page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub profile: ProfileForm,
    pub language: Language,
    pub theme: Theme,
}
