//! Session event types

use serde::{Deserialize, Serialize};

use crate::transcript::Entry;

/// Outcome of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The response body was drained to completion
    Completed,
    /// The exchange failed; the detail is also visible in the transcript
    Failed { detail: String },
}

/// Events emitted by the reconciler during an exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A submission was accepted; the user entry is in the transcript and
    /// the request is about to be issued
    SessionStart,

    /// A success status was confirmed; streaming begins
    StreamStart,

    /// The tail entry changed. Carries the entry's current state — during
    /// streaming its text is the complete response-so-far, not a diff.
    TranscriptUpdate { entry: Entry },

    /// The session ended; the reconciler is idle again
    SessionEnd { outcome: SessionOutcome },

    /// Fire-and-forget hint for the renderer to reveal the latest entry.
    /// Emitted after every session, success or failure.
    ScrollToLatest,
}

impl SessionEvent {
    /// Check if this event marks the end of a session
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionEvent::SessionEnd { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Role;

    #[test]
    fn test_terminal_events() {
        assert!(
            SessionEvent::SessionEnd {
                outcome: SessionOutcome::Completed
            }
            .is_terminal()
        );
        assert!(!SessionEvent::SessionStart.is_terminal());
        assert!(!SessionEvent::ScrollToLatest.is_terminal());
    }

    #[test]
    fn test_event_serialization_tag() {
        let event = SessionEvent::TranscriptUpdate {
            entry: Entry {
                role: Role::Assistant,
                text: "Hi".into(),
                timestamp: 0,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "transcript_update");
        assert_eq!(json["entry"]["role"], "assistant");
    }
}
