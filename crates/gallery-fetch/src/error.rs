//! Error types for gallery-fetch.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Every attempt failed; `reason` is the last underlying failure.
    #[error("network error after {attempts} attempts: {reason}")]
    Network { attempts: u32, reason: String },

    /// The operation was superseded. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_cancelled(&self) -> bool { matches!(self, Error::Cancelled) }

    /// Message suitable for an error banner, or `None` for cancellation.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Error::Cancelled => None,
            Error::Network { reason, .. } => Some(reason.clone()),
            Error::InvalidInput(msg) => Some(msg.clone()),
            Error::InvalidBaseUrl { .. } => Some(self.to_string()),
        }
        .filter(|msg| !msg.trim().is_empty())
    }
}
