use crate::state::AppState;
use axum::{routing::get, Router};

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

pub use dto::{Category, SortOrder};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/vacancies",
            get(handlers::list_vacancies).post(handlers::create_vacancy),
        )
        .route(
            "/vacancies/:id",
            get(handlers::get_vacancy)
                .put(handlers::update_vacancy)
                .delete(handlers::delete_vacancy),
        )
}
