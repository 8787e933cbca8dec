use thiserror::Error;

/// Failure classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure or non-success HTTP status
    Network,
    /// Body was not JSON, or not the shape the extractor reads
    Parse,
}

/// JMA client errors
#[derive(Debug, Error)]
pub enum JmaError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid JSON: {0}")]
    Decode(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl JmaError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        JmaError::Parse(message.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            JmaError::Network(_) | JmaError::Status { .. } => FailureKind::Network,
            JmaError::Decode(_) | JmaError::Parse(_) => FailureKind::Parse,
        }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            JmaError::Status { status, .. } => Some(*status),
            JmaError::Network(e) => e.status().map(|s| s.as_u16()),
            JmaError::Decode(_) | JmaError::Parse(_) => None,
        }
    }
}
