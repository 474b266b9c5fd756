use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// The three failure kinds a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ErrorKind {
    MissingParameter,
    InvalidParameter,
    InternalError,
}

impl ErrorKind {
    /// Stable numeric code for the transport layer.
    pub const fn code(self) -> u16 {
        match self {
            Self::MissingParameter => 1000,
            Self::InvalidParameter => 1001,
            Self::InternalError => 1002,
        }
    }
}

/// Errors that can occur while serving a vendor search.
///
/// Collaborator failures never escape as-is: they are logged and mapped to
/// one of these variants at the service boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("{0}")]
    MissingParameter(String),
    #[error("{0}")]
    InvalidParameter(String),
    #[error("{0}")]
    Internal(String),
}

impl SearchError {
    pub fn missing(msg: impl Into<String>) -> Self {
        Self::MissingParameter(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter(_) => ErrorKind::MissingParameter,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }

    pub fn code(&self) -> u16 {
        self.kind().code()
    }

    pub fn message(&self) -> &str {
        match self {
            Self::MissingParameter(msg) | Self::InvalidParameter(msg) | Self::Internal(msg) => msg,
        }
    }
}
