use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record. `id` is the external auth provider's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: String,
    pub is_admin: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Bearer-credential record linking a token to a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub session_token: String,
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Session {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at < now
    }
}

/// One stored query/response exchange. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub query: String,
    pub response: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::datetime, Duration};

    #[test]
    fn session_expiry_is_strict() {
        let now = datetime!(2026-01-10 12:00 UTC);
        let mut s = Session {
            session_token: "t".into(),
            user_id: "u".into(),
            expires_at: now + Duration::seconds(1),
            created_at: now,
        };
        assert!(!s.is_expired(now));
        s.expires_at = now - Duration::seconds(1);
        assert!(s.is_expired(now));
    }

    #[test]
    fn user_timestamp_serializes_as_rfc3339() {
        let user = User {
            id: "u1".into(),
            email: "a@b.edu".into(),
            name: "A".into(),
            picture: String::new(),
            is_admin: false,
            created_at: datetime!(2026-03-01 08:30:15 UTC),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["created_at"], "2026-03-01T08:30:15Z");
        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
