use std::sync::Arc;

use crate::auth::provider::{AuthProvider, HttpAuthProvider};
use crate::chat::llm::{GeminiClient, LlmClient};
use crate::config::AppConfig;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<AppConfig>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub llm: Arc<dyn LlmClient>,
}

impl AppState {
    /// Wires the HTTP-backed providers around an already connected database.
    pub fn init(config: AppConfig, db: Arc<dyn Database>) -> anyhow::Result<Self> {
        let auth_provider =
            Arc::new(HttpAuthProvider::new(&config.auth_provider)?) as Arc<dyn AuthProvider>;
        let llm = Arc::new(GeminiClient::new(config.llm.clone())?) as Arc<dyn LlmClient>;

        Ok(Self::from_parts(db, Arc::new(config), auth_provider, llm))
    }

    pub fn from_parts(
        db: Arc<dyn Database>,
        config: Arc<AppConfig>,
        auth_provider: Arc<dyn AuthProvider>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            db,
            config,
            auth_provider,
            llm,
        }
    }
}
