use thiserror::Error;

use crate::promclient::{ApiError, ValueType};

#[derive(Debug, Clone, Error, PartialEq)]
/// Errors surfaced to the query engine.
pub enum QuerierError {
    #[error("Cannot translate matchers. {0}")]
    Translation(String),

    /// Root cause of a failed remote call. Any wrapping context has already been stripped.
    #[error("Remote call failed: {0}")]
    Remote(ApiError),

    #[error("Unsupported value type: {0}")]
    UnsupportedShape(ValueType),

    #[error("Query cancelled")]
    Cancelled,
}

impl QuerierError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, QuerierError::Cancelled)
    }
}

pub type QuerierResult<T> = Result<T, QuerierError>;
