//! User session domain model.

use serde::{Deserialize, Serialize};

/// A user as seen by the rest of the application.
///
/// This is the password-free view: it is what the session slot holds and
/// what handlers return. The stored credential record lives in the
/// persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// First and last name split on the first space, as the settings form shows them.
    pub fn name_parts(&self) -> (String, String) {
        let mut parts = self.display_name.split(' ');
        let first = parts.next().unwrap_or_default().to_string();
        let last = parts.next().unwrap_or_default().to_string();
        (first, last)
    }
}
