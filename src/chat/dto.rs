use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}
