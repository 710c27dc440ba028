//! Language, theme and settings-page operations.

use domain::models::{Language, PasswordChange, Theme};
use persistence::repositories::PreferenceRepository;
use persistence::StoreError;
use std::sync::RwLock;

/// UI preferences. The language is persisted; the theme lives for the
/// process only.
pub struct PreferenceService {
    repository: PreferenceRepository,
    theme: RwLock<Theme>,
}

impl PreferenceService {
    pub fn new(repository: PreferenceRepository) -> Self {
        Self {
            repository,
            theme: RwLock::new(Theme::default()),
        }
    }

    pub fn language(&self) -> Result<Language, StoreError> {
        self.repository.language()
    }

    pub fn set_language(&self, language: Language) -> Result<Language, StoreError> {
        self.repository.set_language(language)?;
        tracing::info!(language = %language, "Language changed");
        Ok(language)
    }

    pub fn theme(&self) -> Theme {
        *self.theme.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_theme(&self, theme: Theme) -> Theme {
        *self.theme.write().unwrap_or_else(|e| e.into_inner()) = theme;
        tracing::debug!(theme = ?theme, "Theme set");
        theme
    }

    pub fn toggle_theme(&self) -> Theme {
        let mut theme = self.theme.write().unwrap_or_else(|e| e.into_inner());
        *theme = theme.toggled();
        tracing::debug!(theme = ?*theme, "Theme toggled");
        *theme
    }

    /// Records a password change request. Nothing is stored: only a
    /// confirmed request is acknowledged, and only in the log.
    pub fn request_password_change(&self, change: &PasswordChange) -> bool {
        if change.is_confirmed() {
            tracing::info!("Password change requested");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::MemoryStore;
    use std::sync::Arc;

    fn service() -> PreferenceService {
        PreferenceService::new(PreferenceRepository::new(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn test_language_defaults_and_persists() {
        let prefs = service();
        assert_eq!(prefs.language().unwrap(), Language::Az);
        prefs.set_language(Language::En).unwrap();
        assert_eq!(prefs.language().unwrap(), Language::En);
    }

    #[test]
    fn test_theme_toggle_and_set() {
        let prefs = service();
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.set_theme(Theme::Light), Theme::Light);
    }

    #[test]
    fn test_password_change_needs_confirmation() {
        let prefs = service();
        let mut change = PasswordChange {
            current_password: "Old12345".to_string(),
            new_password: "New12345".to_string(),
            confirm_password: "Other123".to_string(),
        };
        assert!(!prefs.request_password_change(&change));
        change.confirm_password = "New12345".to_string();
        assert!(prefs.request_password_change(&change));
        assert!(!prefs.request_password_change(&PasswordChange::default()));
    }
}
