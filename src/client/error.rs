//! Client error types

use thiserror::Error;

/// Transport-level failure talking to the POS API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's `error` text when it sent one
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Sign-in failures. Server, network and role problems all surface as
/// `Invalid` so the screen shows one message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Enter your PIN")]
    BlankPin,

    #[error("Invalid PIN")]
    Invalid,
}

/// Failures of a screen action.
#[derive(Debug, Error)]
pub enum DeskError {
    /// A required field is missing; nothing was sent.
    #[error("{0}")]
    Validation(&'static str),

    #[error("Service already added")]
    AlreadyAdded,

    #[error("Unknown service {0}")]
    UnknownService(i32),

    /// The same action is still waiting for the server.
    #[error("Request already in progress")]
    Busy,

    #[error("Not signed in")]
    NoSession,

    #[error(transparent)]
    Api(#[from] ClientError),
}
