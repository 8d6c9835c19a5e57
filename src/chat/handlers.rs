use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    context::{build_prompt, Snapshot},
    dto::{ChatQuery, ChatResponse},
    HISTORY_LIMIT,
};
use crate::{
    auth::extractors::{AuthUser, MaybeUser},
    db::ChatMessage,
    error::{AppJson, AppResult},
    state::AppState,
};

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat/query", post(chat_query))
        .route("/chat/history", get(chat_history))
}

/// Answers a question from the reference data. Provider failures come back
/// as the answer text with a 200, never as an HTTP error.
#[instrument(skip_all)]
pub async fn chat_query(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    AppJson(body): AppJson<ChatQuery>,
) -> AppResult<Json<ChatResponse>> {
    let context = Snapshot::load(state.db.as_ref()).await?.render();
    let session_id = body
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let prompt = build_prompt(&context, &body.query);
    let response = match state.llm.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, %session_id, "llm call failed; answering in-band");
            e.to_string()
        }
    };

    if let Some(user) = caller {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            user_id: user.id,
            query: body.query,
            response: response.clone(),
            timestamp: OffsetDateTime::now_utc(),
        };
        state.db.insert_chat_message(&message).await?;
        info!(user_id = %message.user_id, message_id = %message.id, "chat exchange stored");
    }

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}

#[instrument(skip_all)]
pub async fn chat_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<ChatMessage>>> {
    let history = state
        .db
        .list_chat_messages(Some(&user.id), HISTORY_LIMIT)
        .await?;
    Ok(Json(history))
}
