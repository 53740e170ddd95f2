//! Structured upstream failures.

use reqwest::StatusCode;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of one upstream account operation.
///
/// Carries the cause (`source()`), the message relayed to callers
/// (`Display`), and the status code the proxy should answer with.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The outbound request could not be constructed.
    #[error("malfunctioned upstream request: {0}")]
    Request(#[source] BoxError),

    /// Transport failure: connect, DNS, timeout, or reading the body.
    #[error("unable to reach accounts api: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Upstream answered with a non-success status. The body is kept verbatim.
    #[error("{body}")]
    Rejected { status: StatusCode, body: String },

    /// A successful response did not contain a valid account envelope.
    #[error("unable to decode the account response from accounts api: {0}")]
    Decode(#[source] serde_json::Error),
}

impl UpstreamError {
    /// Build a request construction failure from any error.
    pub fn request(err: impl Into<BoxError>) -> Self {
        Self::Request(err.into())
    }

    /// Status code to relay to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Request(_) | Self::Unreachable(_) | Self::Decode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Human-readable message relayed as the response body.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether upstream itself refused the operation (a business failure, not a fault).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Request(Box::new(err))
        } else {
            Self::Unreachable(err)
        }
    }
}
