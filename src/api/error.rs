//! Error type for command handlers.

use thiserror::Error;

use crate::error::Error;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    /// Guard rejected the command (required input fields missing).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),

    /// No authenticated user in the session.
    #[error("authentication required")]
    Unauthenticated,

    #[error(transparent)]
    Domain(#[from] Error),
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        HandlerError::Domain(Error::Store(err))
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Unauthenticated => 401,
            HandlerError::Domain(e) => match e {
                Error::NotFound { .. } => 404,
                Error::Unauthorized(_) => 403,
                Error::Validation(_) => 400,
                Error::UpstreamUnavailable => 502,
                Error::Store(_) => 500,
            },
        }
    }
}
