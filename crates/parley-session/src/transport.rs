//! Transport abstraction between the reconciler and the wire client

use async_trait::async_trait;
use parley_api::{ChatClient, ChatRequest, TextStream};

/// Opens one chat exchange and hands back the response as text segments.
///
/// The reconciler only sees this seam; tests drive it with a scripted
/// implementation instead of a live backend.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Issue the request and suspend until the response status is known.
    ///
    /// Returns `Err` for transport failures and non-success statuses; on
    /// success the stream yields decoded segments until the body closes.
    async fn open(&self, request: ChatRequest) -> parley_api::Result<TextStream>;
}

/// Live transport calling the chat endpoint over HTTP
pub struct HttpTransport {
    client: ChatClient,
}

impl HttpTransport {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    /// Transport against a locally running backend
    pub fn local() -> Self {
        Self::new(ChatClient::local())
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn open(&self, request: ChatRequest) -> parley_api::Result<TextStream> {
        self.client.stream_chat(&request).await
    }
}
