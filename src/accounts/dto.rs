use serde::{Deserialize, Serialize};

use crate::auth::repo::Account;
use crate::auth::AccountView;
use crate::vacancies::dto::VacancyPage;

/// Request body for profile edit. Avatar replacement is a separate upload.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub username: String,
}

/// The caller's own profile with their vacancies.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub account: AccountView,
    pub vacancies: VacancyPage,
}

/// What anyone may see of an account. No email.
#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub id: i64,
    pub username: String,
    pub image_file: String,
}

impl From<&Account> for PublicProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            image_file: account.image_file.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub profile: PublicProfile,
    pub vacancies: VacancyPage,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub image_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_profile_hides_email() {
        let account = Account {
            id: 3,
            email: "bob@example.com".into(),
            username: "bob".into(),
            password_hash: "$argon2id$x".into(),
            image_file: "default.png".into(),
            token_version: 0,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&PublicProfile::from(&account)).unwrap();
        assert!(json.contains("bob"));
        assert!(!json.contains("bob@example.com"));
        assert!(!json.contains("argon2"));
    }
}
