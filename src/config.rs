use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_AUTH_PROVIDER_URL: &str =
    "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Absent key means chat answers with an in-band "not configured" message.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthProviderConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: Option<String>,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
    pub auth_provider: AuthProviderConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let database_name = std::env::var("DB_NAME").ok().filter(|v| !v.is_empty());

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let auth_provider = AuthProviderConfig {
            url: std::env::var("AUTH_PROVIDER_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_PROVIDER_URL.into()),
            timeout_secs: env_parse("AUTH_TIMEOUT_SECS").unwrap_or(15),
        };

        let llm = LlmConfig {
            api_key: std::env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into()),
            api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.into()),
            timeout_secs: env_parse("LLM_TIMEOUT_SECS").unwrap_or(60),
        };

        Ok(Self {
            database_url,
            database_name,
            max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
            cors_origins,
            auth_provider,
            llm,
        })
    }
}

impl AuthProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
