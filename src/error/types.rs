//! Error types for the client.

use thiserror::Error;

/// Main error type for the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Bad command line, detected before any socket is opened.
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Failures of the request/response exchange itself.
    #[error("Exchange error: {kind}")]
    Exchange { kind: ExchangeErrorKind },

    /// I/O errors outside the exchange (e.g. writing to stdout).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exchange error kinds.
#[derive(Error, Debug)]
pub enum ExchangeErrorKind {
    #[error("Failed to connect to {endpoint}: {message}")]
    ConnectFailed { endpoint: String, message: String },

    #[error("Request only partially sent ({sent} of {total} bytes): {message}")]
    SendIncomplete {
        sent: usize,
        total: usize,
        message: String,
    },

    #[error("Failed to receive response: {message}")]
    ReceiveFailed { message: String },

    #[error("Response filled the {capacity} byte buffer")]
    ResponseTooLarge { capacity: usize },

    #[error("{stage} timed out after {seconds} seconds")]
    Timeout { stage: Stage, seconds: u64 },
}

/// Step of the exchange a deadline applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    Send,
    Receive,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Connect => write!(f, "Connect"),
            Stage::Send => write!(f, "Send"),
            Stage::Receive => write!(f, "Receive"),
        }
    }
}

impl ClientError {
    /// Shorthand for wrapping an exchange error kind.
    pub fn exchange(kind: ExchangeErrorKind) -> Self {
        ClientError::Exchange { kind }
    }

    /// A deadline expired during the given stage.
    pub fn timed_out(stage: Stage, deadline: std::time::Duration) -> Self {
        ClientError::Exchange {
            kind: ExchangeErrorKind::Timeout {
                stage,
                seconds: deadline.as_secs(),
            },
        }
    }

    /// Returns the exchange error kind, if this is an exchange failure.
    pub fn exchange_kind(&self) -> Option<&ExchangeErrorKind> {
        match self {
            ClientError::Exchange { kind } => Some(kind),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
