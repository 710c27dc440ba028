//! UI preference repository.

use domain::models::Language;
use std::str::FromStr;
use std::sync::Arc;

use crate::store::{KeyValueStore, StoreError};

/// Key holding the selected UI language code.
pub const LANGUAGE_KEY: &str = "language";

/// Repository for persisted UI preferences.
#[derive(Clone)]
pub struct PreferenceRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored language; absent or unknown codes yield the default.
    pub fn language(&self) -> Result<Language, StoreError> {
        let Some(raw) = self.store.get(LANGUAGE_KEY)? else {
            return Ok(Language::default());
        };

        // Accept both a bare code and a JSON string.
        let code = raw.trim().trim_matches('"');
        Ok(Language::from_str(code).unwrap_or_else(|_| {
            tracing::debug!(code = %code, "Unknown stored language, using default");
            Language::default()
        }))
    }

    pub fn set_language(&self, language: Language) -> Result<(), StoreError> {
        self.store.set(LANGUAGE_KEY, language.as_str().to_string())
    }
}
