use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        cookies::{clear_session_cookie, session_cookie, SESSION_COOKIE},
        dto::SessionResponse,
        extractors::AuthUser,
        services::open_session,
    },
    db::User,
    dto::MessageResponse,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/session", post(create_session))
        .route("/auth/user", get(get_user))
        .route("/auth/logout", post(logout))
}

#[instrument(skip_all)]
pub async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let session_id = headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("Session ID required in x-session-id header".into())
        })?;

    let identity = state.auth_provider.session_data(session_id).await.map_err(|e| {
        warn!(error = %e, "auth provider exchange failed");
        AppError::BadRequest(format!("Failed to get session data: {e}"))
    })?;

    if identity.email.is_empty() {
        warn!("auth provider returned no email");
        return Err(AppError::BadRequest("Auth provider returned no email".into()));
    }

    let (user, session) =
        open_session(state.db.as_ref(), identity, OffsetDateTime::now_utc()).await?;

    info!(user_id = %user.id, "session created");
    let jar = jar.add(session_cookie(&session.session_token));
    Ok((
        jar,
        Json(SessionResponse {
            user,
            session_token: session.session_token,
        }),
    ))
}

#[instrument(skip_all)]
pub async fn get_user(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.db.delete_session(cookie.value()).await?;
        info!("session deleted");
    }
    let jar = jar.add(clear_session_cookie());
    Ok((jar, Json(MessageResponse::new("Logged out successfully"))))
}
