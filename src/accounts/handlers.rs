use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::{info, instrument, warn};

use crate::accounts::dto::{
    AvatarResponse, ProfileResponse, PublicProfile, PublicProfileResponse, UpdateProfileRequest,
};
use crate::accounts::services::{ext_for_avatar, presign_avatar, replace_avatar};
use crate::auth::repo::Account;
use crate::auth::validate::{check_email, check_username};
use crate::auth::{AccountView, CurrentAccount};
use crate::error::ApiError;
use crate::state::AppState;
use crate::vacancies::dto::PageQuery;
use crate::vacancies::handlers::page_view;
use crate::vacancies::repo::Vacancy;
use crate::vacancies::services::{resolve_page, PageResolution, PROFILE_PAGE_SIZE};

#[instrument(skip(state, current))]
pub async fn get_me(
    State(state): State<AppState>,
    current: CurrentAccount,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let account = current.0;
    let total = Vacancy::count_by_author(&state.db, account.id).await?;

    match resolve_page(total, query.page, PROFILE_PAGE_SIZE) {
        PageResolution::Redirect { last_page } => {
            Ok(Redirect::temporary(&format!("/api/v1/me?page={last_page}")).into_response())
        }
        PageResolution::Page {
            page,
            offset,
            total_pages,
        } => {
            let rows =
                Vacancy::list_by_author_page(&state.db, account.id, PROFILE_PAGE_SIZE, offset)
                    .await?;
            Ok(Json(ProfileResponse {
                account: AccountView::from(&account),
                vacancies: page_view(rows, page, total_pages, total),
            })
            .into_response())
        }
    }
}

#[instrument(skip(state, current, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    current: CurrentAccount,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<AccountView>, ApiError> {
    let me = current.0;
    let email = check_email(&payload.email)?;
    let username = check_username(&payload.username)?;

    // "Taken" means taken by someone else; keeping your own values is fine.
    if let Some(other) = Account::find_by_email(&state.db, &email).await? {
        if other.id != me.id {
            warn!(account_id = me.id, %email, "email taken by another account");
            return Err(ApiError::conflict(
                "email",
                format!("Account with email: \"{email}\" already exists"),
            ));
        }
    }
    if let Some(other) = Account::find_by_username(&state.db, &username).await? {
        if other.id != me.id {
            warn!(account_id = me.id, %username, "username taken by another account");
            return Err(ApiError::conflict(
                "username",
                format!("Username: \"{username}\" is taken"),
            ));
        }
    }

    let updated = Account::update_profile(&state.db, me.id, &email, &username).await?;
    info!(account_id = me.id, "profile updated");
    Ok(Json(AccountView::from(&updated)))
}

/// Accepts one `image` part, stores it under a randomized filename and
/// points the account at it.
#[instrument(skip(state, current, multipart))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    current: CurrentAccount,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, ApiError> {
    let me = current.0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation("image", e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        let Some(ext) = ext_for_avatar(&content_type) else {
            return Err(ApiError::validation(
                "image",
                "Only jpg, jpeg and png images are allowed",
            ));
        };
        let body = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation("image", e.to_string()))?;
        if body.is_empty() {
            return Err(ApiError::validation("image", "Uploaded image is empty"));
        }

        let updated = replace_avatar(&state, &me, body, &content_type, ext).await?;
        info!(account_id = me.id, image_file = %updated.image_file, "avatar replaced");
        return Ok(Json(AvatarResponse {
            image_file: updated.image_file,
        }));
    }

    Err(ApiError::validation("image", "image file is required"))
}

/// Deletes the account and everything it owns in one transaction: vacancies
/// first, then the account row, so no vacancy is ever left dangling. The
/// caller's tokens die with the row.
#[instrument(skip(state, current))]
pub async fn delete_me(
    State(state): State<AppState>,
    current: CurrentAccount,
) -> Result<StatusCode, ApiError> {
    let me = current.0;

    let mut tx = state.db.begin().await?;
    let removed = Vacancy::delete_by_author_tx(&mut tx, me.id).await?;
    Account::delete_tx(&mut tx, me.id).await?;
    tx.commit().await?;

    info!(
        account_id = me.id,
        vacancies_removed = removed,
        "account deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let account = Account::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let total = Vacancy::count_by_author(&state.db, account.id).await?;
    match resolve_page(total, query.page, PROFILE_PAGE_SIZE) {
        PageResolution::Redirect { last_page } => Ok(Redirect::temporary(&format!(
            "/api/v1/users/{username}?page={last_page}"
        ))
        .into_response()),
        PageResolution::Page {
            page,
            offset,
            total_pages,
        } => {
            let rows =
                Vacancy::list_by_author_page(&state.db, account.id, PROFILE_PAGE_SIZE, offset)
                    .await?;
            Ok(Json(PublicProfileResponse {
                profile: PublicProfile::from(&account),
                vacancies: page_view(rows, page, total_pages, total),
            })
            .into_response())
        }
    }
}

#[instrument(skip(state))]
pub async fn avatar_redirect(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Redirect, ApiError> {
    let account = Account::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let url = presign_avatar(&state, &account.image_file).await?;
    Ok(Redirect::temporary(&url))
}
