//! Request and response types for the chat endpoint

use serde::{Deserialize, Serialize};

/// Payload for `POST /chat`.
///
/// The backend treats `developer_message` as the system prompt and forwards
/// `api_key` to the upstream model provider. `model` is optional; the server
/// applies its own default when it is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// System prompt supplied by the client
    pub developer_message: String,
    /// The user's message for this exchange
    pub user_message: String,
    /// Credential forwarded verbatim to the backend
    pub api_key: String,
    /// Model override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatRequest {
    /// Create a request with the server-default model
    pub fn new(
        developer_message: impl Into<String>,
        user_message: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            developer_message: developer_message.into(),
            user_message: user_message.into(),
            api_key: api_key.into(),
            model: None,
        }
    }

    /// Set a model override
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Response body of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    /// Whether the backend reported itself healthy
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
