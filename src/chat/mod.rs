use crate::state::AppState;
use axum::Router;

pub mod context;
mod dto;
pub mod handlers;
pub mod llm;

/// Per-user history cap for `GET /chat/history`.
pub const HISTORY_LIMIT: i64 = 50;

pub fn router() -> Router<AppState> {
    handlers::chat_routes()
}
