//! # Client-safe user projection
//!
//! [`store::User`] is the full stored identity, including the Argon2 password
//! hash. [`UserInfo`] is the subset that may cross the HTTP boundary: it omits
//! the hash, flattens the role and login-method tags, and serialises with
//! camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{Role, User};
use uuid::Uuid;

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub login_method: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            login_method: user.login_method.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{LoginMethod, NewUser};

    #[test]
    fn test_info_never_carries_the_hash() {
        let user = User::from_new(NewUser {
            name: String::new(),
            email: "ada@example.com".to_string(),
            role: Role::Admin,
            login_method: LoginMethod::Local,
            password_hash: Some("$argon2id$secret".to_string()),
        });
        let info = UserInfo::from(&user);
        let json = serde_json::to_string(&info).unwrap();

        assert!(!json.contains("argon2"));
        assert!(json.contains(r#""role":"admin""#));
        assert!(json.contains(r#""loginMethod":"local""#));
        assert_eq!(info.email, "ada@example.com");
    }
}
