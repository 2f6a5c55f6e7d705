//! parley-session: transcript store and stream reconciler
//!
//! The two halves of the chat core: [`Transcript`], an ordered append-and-
//! patch message log, and [`Reconciler`], which runs one request/response
//! exchange at a time and folds each streamed increment into the log.
//! Frontends subscribe to [`SessionEvent`]s and render snapshots; they never
//! write to the transcript themselves.

pub mod error;
pub mod events;
pub mod session;
pub mod transcript;
pub mod transport;

pub use error::{Result, SubmitError};
pub use events::{SessionEvent, SessionOutcome};
pub use session::{DEFAULT_DEVELOPER_PROMPT, Phase, Reconciler, SessionConfig};
pub use transcript::{Entry, Role, Transcript};
pub use transport::{ChatTransport, HttpTransport};
