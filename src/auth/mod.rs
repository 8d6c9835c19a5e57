use crate::state::AppState;
use axum::Router;

pub mod cookies;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod provider;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
