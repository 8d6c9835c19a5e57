use async_trait::async_trait;
use serde_json::Value;

#[cfg(test)]
pub mod memory;
pub mod models;
mod postgres;

pub use models::{ChatMessage, Session, User};
pub use postgres::PgDatabase;

/// Persistence seam between handlers and the store.
///
/// Every call is a single atomic read or write. Multi-step flows built on top
/// (session lookup then user lookup, read-modify-write updates) are not
/// transactional.
#[async_trait]
pub trait Database: Send + Sync {
    async fn find_user_by_id(&self, id: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Returns `false` without writing when the id is already taken.
    async fn insert_user(&self, user: &User) -> anyhow::Result<bool>;
    /// Sets `is_admin`. Returns whether a user matched, even if already admin.
    async fn set_admin(&self, id: &str) -> anyhow::Result<bool>;

    /// A token that already exists is re-pointed at `session.user_id` with
    /// the new expiry.
    async fn insert_session(&self, session: &Session) -> anyhow::Result<()>;
    async fn find_session(&self, token: &str) -> anyhow::Result<Option<Session>>;
    async fn delete_session(&self, token: &str) -> anyhow::Result<()>;

    async fn insert_chat_message(&self, message: &ChatMessage) -> anyhow::Result<()>;
    /// Newest first. `user_id = None` lists every user's messages.
    async fn list_chat_messages(
        &self,
        user_id: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<ChatMessage>>;
    async fn delete_chat_message(&self, id: &str) -> anyhow::Result<bool>;

    /// Insertion order, optionally filtered on `doc[field] == value`.
    async fn list_documents(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
        limit: i64,
    ) -> anyhow::Result<Vec<Value>>;
    async fn find_document(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>>;
    async fn insert_document(&self, collection: &str, id: &str, doc: &Value)
        -> anyhow::Result<()>;
    /// Returns false when no document has that id.
    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        doc: &Value,
    ) -> anyhow::Result<bool>;
    async fn delete_document(&self, collection: &str, id: &str) -> anyhow::Result<bool>;
}
