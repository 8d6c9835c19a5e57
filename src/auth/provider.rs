use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::AuthProviderConfig;

#[derive(Debug, Error)]
pub enum AuthProviderError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Identity returned by the external OAuth session-data endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderIdentity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: String,
    pub session_token: Option<String>,
}

impl ProviderIdentity {
    pub fn from_json(data: &Value) -> Self {
        Self {
            id: string_field(data, "id"),
            email: string_field(data, "email"),
            name: string_field(data, "name"),
            picture: string_field(data, "picture"),
            session_token: Some(string_field(data, "session_token")).filter(|t| !t.is_empty()),
        }
    }
}

// Provider ids are sometimes numeric; anything non-null is stringified.
fn string_field(data: &Value, key: &str) -> String {
    match data.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchanges an opaque external session id for an identity.
    async fn session_data(&self, session_id: &str)
        -> Result<ProviderIdentity, AuthProviderError>;
}

pub struct HttpAuthProvider {
    http: Client,
    url: String,
}

impl HttpAuthProvider {
    pub fn new(config: &AuthProviderConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn session_data(
        &self,
        session_id: &str,
    ) -> Result<ProviderIdentity, AuthProviderError> {
        let resp = self
            .http
            .get(&self.url)
            .header("X-Session-ID", session_id)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthProviderError::Status { status, body });
        }

        let data: Value = resp.json().await?;
        debug!("session data received from auth provider");
        Ok(ProviderIdentity::from_json(&data))
    }
}
