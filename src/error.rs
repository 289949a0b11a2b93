use thiserror::Error;

use crate::store::{Document, StoreError};

/// Errors surfaced by bookshelf operations.
///
/// Aggregations never produce `NotFound` for missing data; an unknown
/// catalog id or an empty follow list yields an empty result instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested user, entry, comment or catalog title does not exist.
    #[error("{collection} not found: {id}")]
    NotFound { collection: &'static str, id: String },

    /// The caller does not own the entry or comment it tried to change.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The catalog lookup failed or timed out.
    #[error("catalog lookup failed")]
    UpstreamUnavailable,

    /// Malformed input, rejected before any store write.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn not_found<D: Document>(id: impl Into<String>) -> Self {
        Error::NotFound {
            collection: D::COLLECTION,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
