use anyhow::Context;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::auth::repo::Account;
use crate::state::AppState;

/// Sentinel filename for accounts that never uploaded an avatar. The object
/// is shared, so it is never deleted on replacement.
pub const DEFAULT_AVATAR: &str = "default.png";

const PRESIGN_TTL_SECS: u64 = 10 * 60;

pub fn avatar_key(filename: &str) -> String {
    format!("avatars/{filename}")
}

/// Only the formats the original profile form accepted.
pub fn ext_for_avatar(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

/// Randomized filename so concurrent uploads can never collide.
pub fn random_avatar_filename(ext: &str) -> String {
    format!("{}.{ext}", Uuid::new_v4())
}

/// Upload a replacement avatar, point the account at it, then drop the old
/// object. The DB row is updated before the old object is removed so a
/// failed delete leaves an orphan object, never a dangling reference.
pub async fn replace_avatar(
    state: &AppState,
    account: &Account,
    body: Bytes,
    content_type: &str,
    ext: &str,
) -> anyhow::Result<Account> {
    let filename = random_avatar_filename(ext);
    let key = avatar_key(&filename);
    state
        .storage
        .put_object(&key, body, content_type)
        .await
        .with_context(|| format!("put_object {key}"))?;

    let updated = Account::update_avatar(&state.db, account.id, &filename).await?;

    if account.image_file != DEFAULT_AVATAR {
        let old_key = avatar_key(&account.image_file);
        if let Err(e) = state.storage.delete_object(&old_key).await {
            warn!(error = %e, key = %old_key, "failed to delete replaced avatar");
        }
    }
    Ok(updated)
}

pub async fn presign_avatar(state: &AppState, filename: &str) -> anyhow::Result<String> {
    state
        .storage
        .presign_get(&avatar_key(filename), PRESIGN_TTL_SECS)
        .await
        .with_context(|| format!("presign avatar {filename}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ext_for_avatar_accepts_form_formats_only() {
        assert_eq!(ext_for_avatar("image/jpeg"), Some("jpg"));
        assert_eq!(ext_for_avatar("image/jpg"), Some("jpg"));
        assert_eq!(ext_for_avatar("image/png"), Some("png"));
        assert_eq!(ext_for_avatar("image/webp"), None);
        assert_eq!(ext_for_avatar("application/octet-stream"), None);
    }

    #[test]
    fn random_filenames_do_not_collide() {
        let a = random_avatar_filename("png");
        let b = random_avatar_filename("png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }

    #[tokio::test]
    async fn presign_builds_an_avatar_url() {
        let state = crate::state::AppState::fake();
        let url = presign_avatar(&state, "abc.png").await.unwrap();
        assert!(url.contains("avatars/abc.png"));
    }
}
