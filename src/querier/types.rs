use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::types::Timestamp;
use crate::error::QuerierResult;

/// An advisory, non-fatal message accompanying a result.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{0}")]
pub struct Warning(pub String);

impl Warning {
    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type Warnings = Vec<Warning>;

/// Hints describing the data a `select` call needs. Their presence makes the call a data
/// fetch; their absence a series-discovery (metadata) lookup.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectParams {
    /// Start time in milliseconds.
    pub start: Timestamp,
    /// End time in milliseconds.
    pub end: Timestamp,
    /// Query step size in milliseconds, 0 when not a range query.
    pub step: i64,
    /// Name of the surrounding function or aggregation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func: Option<String>,
}

impl SelectParams {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        SelectParams {
            start,
            end,
            ..Default::default()
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn with_func<S: Into<String>>(mut self, func: S) -> Self {
        self.func = Some(func.into());
        self
    }
}

/// Result of a querier call, carrying warnings even when the call failed.
#[derive(Debug)]
pub struct StorageResponse<T> {
    pub result: QuerierResult<T>,
    pub warnings: Warnings,
}

impl<T> StorageResponse<T> {
    pub fn new(result: QuerierResult<T>, warnings: Warnings) -> Self {
        StorageResponse { result, warnings }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_parts(self) -> (QuerierResult<T>, Warnings) {
        (self.result, self.warnings)
    }
}
