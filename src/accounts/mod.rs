use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

mod dto;
pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::get_me)
                .put(handlers::update_me)
                .delete(handlers::delete_me),
        )
        .route("/me/avatar", post(handlers::upload_avatar))
        .route("/users/:username", get(handlers::public_profile))
        .route("/users/:username/avatar", get(handlers::avatar_redirect))
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024)) // 5MB, avatars only
}
