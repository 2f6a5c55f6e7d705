//! HTTP client for the chat endpoint

use crate::{
    error::{Error, Result},
    stream::{TextStream, text_segments},
    types::{ChatRequest, HealthStatus},
};

/// Base URL of a backend running locally alongside the client
pub const LOCAL_BASE_URL: &str = "http://localhost:8000/api";

/// Client for one chat backend.
///
/// The base URL is fixed for the lifetime of the client; the process picks it
/// once at startup from its deployment mode.
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    /// Create a client against the given base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client against a locally running backend
    pub fn local() -> Self {
        Self::new(LOCAL_BASE_URL)
    }

    /// The base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open a chat exchange and stream the response body.
    ///
    /// Suspends until the response status is known. A non-success status
    /// reads the full body as the failure detail and returns
    /// [`Error::Status`]; no streaming occurs on that path. On success the
    /// returned stream yields decoded text segments until the transport
    /// closes the body.
    pub async fn stream_chat(&self, request: &ChatRequest) -> Result<TextStream> {
        let url = format!("{}/chat", self.base_url);
        tracing::debug!(%url, "opening chat exchange");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "chat endpoint refused the exchange");
            return Err(Error::Status { status, body });
        }

        Ok(text_segments(response))
    }

    /// Probe the backend's health endpoint
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }

        let health = response.json().await?;
        Ok(health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ChatClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_local_client_base() {
        let client = ChatClient::local();
        assert_eq!(client.base_url(), LOCAL_BASE_URL);
    }
}
