//! Error types for parley-session

use thiserror::Error;

/// Result type alias using parley-session Error
pub type Result<T> = std::result::Result<T, SubmitError>;

/// Reasons a submission is refused before any network activity.
///
/// Exchange failures after acceptance are not errors at this boundary: they
/// surface as transcript content and a `Failed` session outcome instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Message or credential was empty after trimming; nothing was appended
    /// and no request was issued
    #[error("message and credential must be non-empty")]
    EmptyInput,

    /// A session is already active; the submission was dropped, not queued
    #[error("a session is already active")]
    Busy,
}
