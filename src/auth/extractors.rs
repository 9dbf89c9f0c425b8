use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::{JwtKeys, TokenKind};
use crate::auth::repo::Account;
use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the acting account for a request from its Bearer token.
///
/// The token must be an access token whose `ver` claim matches the account's
/// current `token_version`; logout bumps the version, so revoked tokens fail
/// here even though their signature is still valid. Handlers receive the
/// loaded account and pass it (or its id) down explicitly.
pub struct CurrentAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("invalid auth scheme".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthorized("invalid or expired token".into())
        })?;

        if claims.kind != TokenKind::Access {
            return Err(ApiError::Unauthorized("access token required".into()));
        }

        let account = Account::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("account no longer exists".into()))?;

        if claims.ver != account.token_version {
            warn!(account_id = account.id, "token from a revoked session");
            return Err(ApiError::Unauthorized("session revoked".into()));
        }

        Ok(CurrentAccount(account))
    }
}
