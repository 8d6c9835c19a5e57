use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

/// Display text of each variant is what the chat caller sees in place of an answer.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("AI model not configured. Please set GEMINI_API_KEY in environment.")]
    NotConfigured,

    #[error("Gemini API error: {0}")]
    Api(String),

    #[error("Failed to call Gemini: {0}")]
    Transport(String),
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

pub struct GeminiClient {
    http: Client,
    config: LlmConfig,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(%status, "gemini returned an error status");
            return Err(LlmError::Api(text));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        debug!(model = %self.config.model, "gemini response received");
        Ok(extract_text(&data))
    }
}

/// Pulls the answer out of a generateContent payload, falling back to the
/// raw JSON when no known shape matches.
pub fn extract_text(data: &Value) -> String {
    if let Some(candidate) = data
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
    {
        let text = candidate
            .get("output")
            .and_then(Value::as_str)
            .or_else(|| {
                candidate
                    .pointer("/content/parts/0/text")
                    .and_then(Value::as_str)
            })
            .or_else(|| candidate.get("text").and_then(Value::as_str));
        return match text {
            Some(t) => t.to_string(),
            None => candidate.to_string(),
        };
    }

    if let Some(first) = data
        .get("outputs")
        .and_then(Value::as_array)
        .and_then(|o| o.first())
    {
        return match first.as_str() {
            Some(s) => s.to_string(),
            None => first.to_string(),
        };
    }

    data.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: api_key.map(String::from),
            model: "gemini-2.0-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta/".into(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn extracts_candidate_part_text() {
        let data = json!({
            "candidates": [{ "content": { "parts": [{ "text": "The library opens at 8." }] } }]
        });
        assert_eq!(extract_text(&data), "The library opens at 8.");
    }

    #[test]
    fn prefers_output_then_text() {
        assert_eq!(extract_text(&json!({ "candidates": [{ "output": "o" }] })), "o");
        assert_eq!(extract_text(&json!({ "candidates": [{ "text": "t" }] })), "t");
    }

    #[test]
    fn falls_back_to_outputs_and_raw() {
        assert_eq!(extract_text(&json!({ "outputs": ["first", "second"] })), "first");
        let raw = json!({ "unexpected": true });
        assert_eq!(extract_text(&raw), raw.to_string());
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let client = GeminiClient::new(config(Some("k"))).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_reports_not_configured() {
        let client = GeminiClient::new(config(None)).unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: "prompt" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "contents": [{ "parts": [{ "text": "prompt" }] }] })
        );
    }
}
