//! Error types for parley-api

use thiserror::Error;

/// Result type alias using parley-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the chat endpoint
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response status was available
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Failure while reading the response body mid-stream
    #[error("stream read error: {0}")]
    Read(String),
}

impl Error {
    /// Human-readable failure detail, suitable for showing in a transcript.
    ///
    /// For a non-success status this is the error body the server sent, or a
    /// generic status message when the body was empty. Other variants use
    /// their display form.
    pub fn detail(&self) -> String {
        match self {
            Error::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("request failed with status {status}")
                } else {
                    body.to_string()
                }
            }
            Error::Read(detail) => detail.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error was raised after a success status was confirmed
    pub fn is_mid_stream(&self) -> bool {
        matches!(self, Error::Read(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_uses_error_body() {
        let e = Error::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "bad key".into(),
        };
        assert_eq!(e.detail(), "bad key");
    }

    #[test]
    fn test_detail_trims_body() {
        let e = Error::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "missing field\n".into(),
        };
        assert_eq!(e.detail(), "missing field");
    }

    #[test]
    fn test_detail_generic_on_empty_body() {
        let e = Error::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert_eq!(e.detail(), "request failed with status 502 Bad Gateway");
    }

    #[test]
    fn test_detail_whitespace_body_counts_as_empty() {
        let e = Error::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "  \n".into(),
        };
        assert!(e.detail().starts_with("request failed with status"));
    }

    #[test]
    fn test_detail_of_read_error_is_bare() {
        let e = Error::Read("connection reset".into());
        assert_eq!(e.detail(), "connection reset");
    }

    #[test]
    fn test_read_error_is_mid_stream() {
        assert!(Error::Read("connection reset".into()).is_mid_stream());
        assert!(
            !Error::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }
            .is_mid_stream()
        );
    }
}
