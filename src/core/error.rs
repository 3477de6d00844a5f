//! Engine-level error taxonomy.
//!
//! Transport-agnostic: the HTTP layer maps these onto status codes
//! (NotFound -> 404, Conflict -> 409, Validation -> 400,
//! StoreUnavailable -> 503, Internal -> 500).

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => CoreError::StoreUnavailable(msg),
            StoreError::Query(msg) => CoreError::Internal(msg),
            StoreError::Corrupt(msg) => CoreError::Internal(msg),
        }
    }
}
