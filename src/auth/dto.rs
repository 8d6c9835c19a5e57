use serde::Serialize;

use crate::db::User;

/// Returned by `POST /auth/session`. The token is repeated for bearer clients.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,
    pub session_token: String,
}
