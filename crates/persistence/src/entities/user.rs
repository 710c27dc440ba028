//! Registered user entity (persisted record mapping).

use serde::{Deserialize, Serialize};

/// One element of the persisted `users` array.
///
/// Unlike the domain `User`, this carries the password, in plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub uid: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl UserEntity {
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            uid: entity.uid,
            email: entity.email,
            display_name: entity.display_name,
            phone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::User;

    fn entity() -> UserEntity {
        UserEntity {
            uid: "u-1".to_string(),
            email: "grower@example.com".to_string(),
            password: "Greenhouse1".to_string(),
            display_name: "Grower".to_string(),
        }
    }

    #[test]
    fn test_matches_credentials_is_exact() {
        let e = entity();
        assert!(e.matches_credentials("grower@example.com", "Greenhouse1"));
        assert!(!e.matches_credentials("grower@example.com", "greenhouse1"));
        assert!(!e.matches_credentials("Grower@example.com", "Greenhouse1"));
    }

    #[test]
    fn test_conversion_strips_password() {
        let user: User = entity().into();
        assert_eq!(user.uid, "u-1");
        assert_eq!(user.display_name, "Grower");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(entity()).unwrap();
        assert_eq!(json["displayName"], "Grower");
        assert_eq!(json["password"], "Greenhouse1");
    }
}
