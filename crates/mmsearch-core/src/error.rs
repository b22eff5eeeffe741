use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Format(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unexpected_format() -> Self {
        Self::Format("Unexpected response format".to_string())
    }
}

/// Outcome of a single HTTP exchange that never produced a usable response.
///
/// `detail` holds whatever text the backend sent with a non-2xx status. It is
/// kept for callers that want it but never rendered into the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request failed: {status}")]
    Http { status: u16, detail: Option<String> },
}

impl TransportError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Http { .. } => "http",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => None,
            Self::Http { status, .. } => Some(*status),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
