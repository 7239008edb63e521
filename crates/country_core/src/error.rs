use std::fmt;

/// Cause reported when the server answers 2xx without a payload.
pub const NULL_BODY_MESSAGE: &str = "Response from server is null";

/// Human-readable description of why a fetch did not produce a list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn null_body() -> Self {
        Self::new(FailureKind::NullBody, NULL_BODY_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NullBody,
    HttpStatus(u16),
    InvalidUrl,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Cancelled,
    Network,
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NullBody => write!(f, "null body"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Internal => write!(f, "internal error"),
        }
    }
}
