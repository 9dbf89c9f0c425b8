use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::dto::{AccountView, AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
use crate::auth::extractors::CurrentAccount;
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::Account;
use crate::auth::validate::{check_email, check_password, check_username};
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

fn token_pair(keys: &JwtKeys, account: &Account) -> anyhow::Result<(String, String)> {
    let access = keys.sign_access(account.id, account.token_version)?;
    let refresh = keys.sign_refresh(account.id, account.token_version)?;
    Ok((access, refresh))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email = check_email(&payload.email)?;
    let username = check_username(&payload.username)?;
    check_password(&payload.password)?;
    if payload.password != payload.confirm_password {
        return Err(ApiError::validation(
            "confirm_password",
            "Passwords do not match",
        ));
    }

    // Each conflict is reported against its own field, email first,
    // and nothing is written until both checks pass.
    if Account::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::conflict(
            "email",
            format!("Account with email: \"{email}\" already exists"),
        ));
    }
    if Account::find_by_username(&state.db, &username)
        .await?
        .is_some()
    {
        warn!(%username, "username taken");
        return Err(ApiError::conflict(
            "username",
            format!("Username: \"{username}\" is taken"),
        ));
    }

    let hash = hash_password(&payload.password)?;
    let account = Account::create(&state.db, &email, &username, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = token_pair(&keys, &account)?;

    info!(account_id = account.id, %username, "account registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            refresh_token,
            account: AccountView::from(&account),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // Unknown username and wrong password are indistinguishable to the caller.
    let account = match Account::find_by_username(&state.db, payload.username.trim()).await? {
        Some(a) => a,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::Unauthorized("Invalid username or password".into()));
        }
    };

    if !verify_password(&payload.password, &account.password_hash)? {
        warn!(account_id = account.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid username or password".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = token_pair(&keys, &account)?;

    info!(account_id = account.id, username = %account.username, "logged in");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        account: AccountView::from(&account),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let account = Account::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("account no longer exists".into()))?;

    if claims.ver != account.token_version {
        return Err(ApiError::Unauthorized("session revoked".into()));
    }

    let (access_token, refresh_token) = token_pair(&keys, &account)?;
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        account: AccountView::from(&account),
    }))
}

/// Revokes every outstanding token for the account.
#[instrument(skip(state, current))]
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentAccount,
) -> Result<StatusCode, ApiError> {
    Account::bump_token_version(&state.db, current.0.id).await?;
    info!(account_id = current.0.id, "logged out");
    Ok(StatusCode::NO_CONTENT)
}
