use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use time::OffsetDateTime;
use tracing::warn;

use super::services::{credential_from_parts, resolve_caller};
use crate::{db::User, error::AppError, state::AppState};

/// Optional caller. Never rejects for missing or stale credentials.
pub struct MaybeUser(pub Option<User>);

/// Authenticated caller; 401 otherwise.
pub struct AuthUser(pub User);

/// Authenticated admin; 401 when unauthenticated, 403 when not admin.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = credential_from_parts(parts) else {
            return Ok(MaybeUser(None));
        };
        let user = resolve_caller(state.db.as_ref(), &token, OffsetDateTime::now_utc()).await?;
        Ok(MaybeUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;
        match user {
            Some(user) => Ok(AuthUser(user)),
            None => {
                warn!(uri = %parts.uri, "unauthenticated request");
                Err(AppError::not_authenticated())
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            warn!(user_id = %user.id, uri = %parts.uri, "admin access denied");
            return Err(AppError::admin_required());
        }
        Ok(AdminUser(user))
    }
}
