use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub(crate) mod validate;

pub use dto::AccountView;
pub use extractors::CurrentAccount;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
