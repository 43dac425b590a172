use serde::{Deserialize, Serialize};

use crate::backend::{ApiError, BackendClient};
use crate::services::path_segment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

pub struct ChatService<'a> {
    backend: &'a BackendClient,
}

impl<'a> ChatService<'a> {
    pub fn new(backend: &'a BackendClient) -> Self {
        Self { backend }
    }

    /// POST /chat/{username}
    pub async fn send_message(
        &self,
        username: &str,
        request: &ChatRequest,
        auth: Option<&str>,
    ) -> Result<ChatReply, ApiError> {
        let path = format!("/chat/{}", path_segment(username));
        self.backend.post_json(&path, request, auth).await
    }

    /// GET /chat/{username}/suggestions
    pub async fn suggested_questions(&self, username: &str) -> Result<Vec<String>, ApiError> {
        let path = format!("/chat/{}/suggestions", path_segment(username));
        self.backend.get_json(&path, &[], None).await
    }
}
