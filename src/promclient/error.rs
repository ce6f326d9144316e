use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a remote API client.
///
/// Clients add context with [`ApiError::context`], which produces a [`ApiError::Wrapped`] chain.
/// [`ApiError::cause`] recovers the innermost error.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    #[error("bad_data: {0}")]
    BadData(String),

    #[error("bad_response: {0}")]
    BadResponse(String),

    #[error("execution: {0}")]
    Execution(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("canceled")]
    Canceled,

    #[error("client_error: {0}")]
    Client(String),

    #[error("server_error: {0}")]
    Server(String),

    #[error("{context}: {source}")]
    Wrapped {
        context: String,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// wraps self with an additional message.
    pub fn context<S: Into<String>>(self, context: S) -> Self {
        ApiError::Wrapped {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// returns the innermost error, discarding all wrapping context.
    pub fn cause(self) -> ApiError {
        let mut err = self;
        while let ApiError::Wrapped { source, .. } = err {
            err = *source;
        }
        err
    }

    /// Context messages from outermost to innermost. Empty for an unwrapped error.
    pub fn context_chain(&self) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut err = self;
        while let ApiError::Wrapped { context, source } = err {
            chain.push(context.as_str());
            err = source;
        }
        chain
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, ApiError::Wrapped { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
