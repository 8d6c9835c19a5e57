use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ChatMessage, Database, Session, User};

/// In-process store used by the router tests.
#[derive(Default)]
pub struct MemoryDatabase {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    sessions: Vec<Session>,
    chat: Vec<ChatMessage>,
    documents: Vec<(String, String, Value)>,
}

impl MemoryDatabase {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn chat_count(&self) -> usize {
        self.lock().chat.len()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn find_user_by_id(&self, id: &str) -> anyhow::Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.id == user.id) {
            return Ok(false);
        }
        inner.users.push(user.clone());
        Ok(true)
    }

    async fn set_admin(&self, id: &str) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_admin = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_session(&self, session: &Session) -> anyhow::Result<()> {
        let mut inner = self.lock();
        match inner
            .sessions
            .iter_mut()
            .find(|s| s.session_token == session.session_token)
        {
            Some(existing) => *existing = session.clone(),
            None => inner.sessions.push(session.clone()),
        }
        Ok(())
    }

    async fn find_session(&self, token: &str) -> anyhow::Result<Option<Session>> {
        Ok(self
            .lock()
            .sessions
            .iter()
            .find(|s| s.session_token == token)
            .cloned())
    }

    async fn delete_session(&self, token: &str) -> anyhow::Result<()> {
        self.lock().sessions.retain(|s| s.session_token != token);
        Ok(())
    }

    async fn insert_chat_message(&self, message: &ChatMessage) -> anyhow::Result<()> {
        self.lock().chat.push(message.clone());
        Ok(())
    }

    async fn list_chat_messages(
        &self,
        user_id: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<ChatMessage>> {
        let mut rows: Vec<ChatMessage> = self
            .lock()
            .chat
            .iter()
            .filter(|m| user_id.map_or(true, |uid| m.user_id == uid))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn delete_chat_message(&self, id: &str) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        let before = inner.chat.len();
        inner.chat.retain(|m| m.id != id);
        Ok(inner.chat.len() != before)
    }

    async fn list_documents(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
        limit: i64,
    ) -> anyhow::Result<Vec<Value>> {
        Ok(self
            .lock()
            .documents
            .iter()
            .filter(|(c, _, _)| c == collection)
            .filter(|(_, _, doc)| match filter {
                Some((field, value)) => doc.get(field).and_then(Value::as_str) == Some(value),
                None => true,
            })
            .take(limit.max(0) as usize)
            .map(|(_, _, doc)| doc.clone())
            .collect())
    }

    async fn find_document(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>> {
        Ok(self
            .lock()
            .documents
            .iter()
            .find(|(c, i, _)| c == collection && i == id)
            .map(|(_, _, doc)| doc.clone()))
    }

    async fn insert_document(
        &self,
        collection: &str,
        id: &str,
        doc: &Value,
    ) -> anyhow::Result<()> {
        self.lock()
            .documents
            .push((collection.to_string(), id.to_string(), doc.clone()));
        Ok(())
    }

    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        doc: &Value,
    ) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        match inner
            .documents
            .iter_mut()
            .find(|(c, i, _)| c == collection && i == id)
        {
            Some(entry) => {
                entry.2 = doc.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_document(&self, collection: &str, id: &str) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        let before = inner.documents.len();
        inner
            .documents
            .retain(|(c, i, _)| !(c == collection && i == id));
        Ok(inner.documents.len() != before)
    }
}
