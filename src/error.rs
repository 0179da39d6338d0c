//! Error taxonomy shared by retrieval, translation and merging.
//!
//! Every failure aborts the current operation and is handed to the caller
//! unchanged. Nothing in this crate retries or swallows an [`Error`].

use thiserror::Error;

/// Coarse classification of an [`Error`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing arguments, detected before any network call.
    InvalidInput,
    /// A single text exceeds the translation service's character ceiling.
    InputTooLarge,
    /// Network or transport failure.
    Connection,
    /// The remote service answered with a non-success status.
    Service,
    /// The response body was not what the service documents.
    Decode,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input too large: {len} characters exceeds the limit of {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("Failed to connect to {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Service responded with status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InputTooLarge { .. } => ErrorKind::InputTooLarge,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Service { .. } => ErrorKind::Service,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
