//! parley-api: wire client for the parley chat endpoint
//!
//! This crate speaks the chat backend's HTTP surface: a `POST /chat` that
//! answers with an unframed streamed text body, and a `GET /health` probe.
//! It knows nothing about transcripts; it turns a request into a stream of
//! decoded text segments.

pub mod client;
pub mod decode;
pub mod error;
pub mod stream;
pub mod types;

pub use client::ChatClient;
pub use error::{Error, Result};
pub use stream::TextStream;
pub use types::{ChatRequest, HealthStatus};

pub use reqwest::StatusCode;
