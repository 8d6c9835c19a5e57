use crate::state::AppState;
use axum::Router;

pub mod handlers;

/// Cap for `GET /admin/all-queries`.
pub const ALL_QUERIES_LIMIT: i64 = 200;

pub fn router() -> Router<AppState> {
    handlers::admin_routes()
}
