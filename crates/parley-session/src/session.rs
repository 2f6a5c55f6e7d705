//! The stream reconciler: one exchange at a time, folded into the transcript.

use std::sync::Arc;

use futures::StreamExt;
use parley_api::ChatRequest;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{
    error::SubmitError,
    events::{SessionEvent, SessionOutcome},
    transcript::{Entry, Role, Transcript},
    transport::ChatTransport,
};

/// Developer prompt used when the frontend does not configure one
pub const DEFAULT_DEVELOPER_PROMPT: &str = "You are a helpful assistant.";

/// Reconciler configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Developer (system) prompt sent with every exchange
    pub developer_prompt: String,
    /// Model override sent with every exchange; server default when `None`
    pub model: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            developer_prompt: DEFAULT_DEVELOPER_PROMPT.to_string(),
            model: None,
        }
    }
}

/// Where the reconciler is in its exchange lifecycle.
///
/// `Loading` covers the window between acceptance of a submission and
/// confirmation of a success status; `Streaming` begins only once that
/// status is confirmed. A failed exchange goes straight from `Loading`
/// back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Streaming,
}

/// Drives one request/response exchange and owns the transcript.
///
/// All transcript writes go through the reconciler; collaborators read via
/// [`snapshot`](Self::snapshot) or event payloads. Segments are folded in
/// strictly in arrival order — the next body read is not issued until the
/// previous segment is in the store.
pub struct Reconciler {
    config: SessionConfig,
    transport: Arc<dyn ChatTransport>,
    transcript: Transcript,
    phase: Phase,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl Reconciler {
    /// Create a reconciler over the given transport
    pub fn new(config: SessionConfig, transport: Arc<dyn ChatTransport>) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            config,
            transport,
            transcript: Transcript::new(),
            phase: Phase::Idle,
            event_tx,
        }
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Current lifecycle phase, read-only
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a session is in flight (used to disable further submissions)
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// The transcript, read-only
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Owned copy of the transcript for rendering
    pub fn snapshot(&self) -> Vec<Entry> {
        self.transcript.snapshot()
    }

    /// Get the session config
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Set the developer prompt for subsequent exchanges
    pub fn set_developer_prompt(&mut self, prompt: impl Into<String>) {
        self.config.developer_prompt = prompt.into();
    }

    /// Set the model override for subsequent exchanges
    pub fn set_model(&mut self, model: Option<String>) {
        self.config.model = model;
    }

    /// Drop the transcript and start fresh. Refused while a session is
    /// active, since the tail may still be receiving increments.
    pub fn clear(&mut self) -> crate::Result<()> {
        if self.is_active() {
            return Err(SubmitError::Busy);
        }
        self.transcript.clear();
        Ok(())
    }

    /// Run one complete exchange.
    ///
    /// Appends the user entry before any network activity, issues the
    /// request, and folds each decoded segment into the transcript tail as
    /// the cumulative response-so-far. Exchange failures surface as
    /// transcript content and a `Failed` outcome, never as an `Err` here;
    /// `Err` only reports submissions refused up front.
    pub async fn submit(&mut self, user_message: &str, credential: &str) -> crate::Result<()> {
        if user_message.trim().is_empty() || credential.trim().is_empty() {
            tracing::debug!("dropping submission with blank message or credential");
            return Err(SubmitError::EmptyInput);
        }
        if self.is_active() {
            tracing::debug!("dropping submission while a session is active");
            return Err(SubmitError::Busy);
        }

        let entry = self.transcript.append(Role::User, user_message).clone();
        self.emit(SessionEvent::TranscriptUpdate { entry });
        self.phase = Phase::Loading;
        self.emit(SessionEvent::SessionStart);

        let request = ChatRequest {
            developer_message: self.config.developer_prompt.clone(),
            user_message: user_message.to_string(),
            api_key: credential.to_string(),
            model: self.config.model.clone(),
        };

        let outcome = self.run_exchange(request).await;
        if let SessionOutcome::Failed { ref detail } = outcome {
            tracing::warn!("exchange failed: {}", detail);
        }

        self.phase = Phase::Idle;
        self.emit(SessionEvent::SessionEnd { outcome });
        self.emit(SessionEvent::ScrollToLatest);
        Ok(())
    }

    /// Open the request and drain the body into the transcript.
    async fn run_exchange(&mut self, request: ChatRequest) -> SessionOutcome {
        let mut stream = match self.transport.open(request).await {
            Ok(stream) => stream,
            Err(e) => {
                // Transport failure or non-success status: no streaming
                // occurred, so no partial entry precedes the error entry.
                let detail = e.detail();
                let entry = self
                    .transcript
                    .append(Role::Assistant, format!("Error: {detail}"))
                    .clone();
                self.emit(SessionEvent::TranscriptUpdate { entry });
                return SessionOutcome::Failed { detail };
            }
        };

        self.phase = Phase::Streaming;
        self.emit(SessionEvent::StreamStart);

        // Cumulative response text; the tail always holds the whole
        // accumulator, never a diff.
        let mut accumulated = String::new();
        let mut opened = false;

        while let Some(segment) = stream.next().await {
            match segment {
                Ok(text) => {
                    accumulated.push_str(&text);
                    let entry = self.transcript.patch_tail(accumulated.clone()).clone();
                    opened = true;
                    self.emit(SessionEvent::TranscriptUpdate { entry });
                }
                Err(e) => {
                    // Partial progress stays visible: the failure is folded
                    // into the same open entry, not rolled back.
                    let detail = e.detail();
                    let text = if accumulated.is_empty() {
                        format!("Error: {detail}")
                    } else {
                        format!("{accumulated}\nError: {detail}")
                    };
                    let entry = self.transcript.patch_tail(text).clone();
                    self.emit(SessionEvent::TranscriptUpdate { entry });
                    return SessionOutcome::Failed { detail };
                }
            }
        }

        if !opened {
            // A body that closed without a single segment still yields
            // exactly one assistant entry for the exchange.
            let entry = self.transcript.patch_tail(String::new()).clone();
            self.emit(SessionEvent::TranscriptUpdate { entry });
        }

        SessionOutcome::Completed
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }

    #[cfg(test)]
    fn force_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}
