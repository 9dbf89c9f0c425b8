use serde::{Deserialize, Serialize};

use crate::auth::repo::Account;

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request body for login. The original form identifies accounts by username.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after register, login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub account: AccountView,
}

/// Public part of an account returned to its owner.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub image_file: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            username: account.username.clone(),
            image_file: account.image_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_view_never_carries_the_hash() {
        let account = Account {
            id: 7,
            email: "alice@example.com".into(),
            username: "alice".into(),
            password_hash: "$argon2id$secret".into(),
            image_file: "default.png".into(),
            token_version: 0,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&AccountView::from(&account)).unwrap();
        assert!(json.contains("alice@example.com"));
        assert!(!json.contains("argon2"));
    }
}
