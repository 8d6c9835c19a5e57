use axum::http::{header, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use rand::{distributions::Alphanumeric, Rng};
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{cookies::SESSION_COOKIE, cookies::SESSION_TTL, provider::ProviderIdentity};
use crate::db::{Database, Session, User};

/// Reads the session token: `session_token` cookie first, then `Authorization: Bearer`.
pub(crate) fn credential_from_parts(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// Resolves a token to its user. Unknown, expired, or orphaned sessions
/// resolve to `None`; expired sessions are left in place.
pub async fn resolve_caller(
    db: &dyn Database,
    token: &str,
    now: OffsetDateTime,
) -> anyhow::Result<Option<User>> {
    let Some(session) = db.find_session(token).await? else {
        debug!("session not found");
        return Ok(None);
    };
    if session.is_expired(now) {
        debug!(user_id = %session.user_id, "session expired");
        return Ok(None);
    }
    db.find_user_by_id(&session.user_id).await
}

/// Upserts the user by email and opens a new session for them.
///
/// A returning user's stored record wins over the freshly fetched identity.
/// A new email whose provider id is already taken gets a fresh id. A reused
/// provider token is handed to this user.
pub async fn open_session(
    db: &dyn Database,
    identity: ProviderIdentity,
    now: OffsetDateTime,
) -> anyhow::Result<(User, Session)> {
    let user = match db.find_user_by_email(&identity.email).await? {
        Some(existing) => existing,
        None => {
            let mut user = User {
                id: identity.id,
                email: identity.email,
                name: identity.name,
                picture: identity.picture,
                is_admin: false,
                created_at: now,
            };
            if !db.insert_user(&user).await? {
                let taken = std::mem::replace(&mut user.id, Uuid::new_v4().to_string());
                warn!(provider_id = %taken, user_id = %user.id, "provider id already in use");
                anyhow::ensure!(db.insert_user(&user).await?, "user id collision");
            }
            info!(user_id = %user.id, email = %user.email, "user created");
            user
        }
    };

    let session = Session {
        session_token: identity.session_token.unwrap_or_else(generate_token),
        user_id: user.id.clone(),
        expires_at: now + SESSION_TTL,
        created_at: now,
    };
    db.insert_session(&session).await?;

    Ok((user, session))
}

pub(crate) fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}
