use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::ALL_QUERIES_LIMIT;
use crate::{
    auth::extractors::AdminUser,
    db::ChatMessage,
    dto::MessageResponse,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/all-queries", get(all_queries))
        .route("/admin/queries/:id", delete(delete_query))
        .route("/admin/make-admin/:id", post(make_admin))
}

#[instrument(skip_all)]
pub async fn all_queries(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<ChatMessage>>> {
    let rows = state.db.list_chat_messages(None, ALL_QUERIES_LIMIT).await?;
    Ok(Json(rows))
}

#[instrument(skip_all)]
pub async fn delete_query(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !state.db.delete_chat_message(&id).await? {
        return Err(AppError::NotFound("Query not found".into()));
    }
    info!(%id, admin_id = %admin.id, "chat message deleted");
    Ok(Json(MessageResponse::new("Query deleted successfully")))
}

/// Idempotent: promoting an existing admin succeeds; only an unknown id is 404.
#[instrument(skip_all)]
pub async fn make_admin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !state.db.set_admin(&user_id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    info!(%user_id, promoted_by = %admin.id, "user promoted to admin");
    Ok(Json(MessageResponse::new("User is now an admin")))
}
