mod debug;
mod error;
#[cfg(test)]
pub(crate) mod fakes;
mod value;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::types::Timestamp;
use crate::common::LabelSet;
use crate::context::Context;
use crate::matchers::Matcher;

pub use debug::*;
pub use error::*;
pub use value::*;

/// Advisory messages attached to a remote response.
pub type ApiWarnings = Vec<String>;

/// Range of a `query_range` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: Timestamp,
    pub end: Timestamp,
    pub step: Duration,
}

/// Response of a remote call. Warnings travel alongside the result and are present even when
/// the call failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: ApiResult<T>,
    pub warnings: ApiWarnings,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            data: Ok(data),
            warnings: vec![],
        }
    }

    pub fn err(err: ApiError) -> Self {
        ApiResponse {
            data: Err(err),
            warnings: vec![],
        }
    }

    pub fn with_warnings(mut self, warnings: ApiWarnings) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn into_parts(self) -> (ApiResult<T>, ApiWarnings) {
        (self.data, self.warnings)
    }
}

/// Client for a remote Prometheus-compatible API.
///
/// Implementations own transport, retries and authentication, and must be safe to share
/// between threads. Every call receives the caller's [`Context`] and should abort with
/// [`ApiError::Canceled`] once it is cancelled.
pub trait Api: Send + Sync {
    /// returns all the unique label names present in the block in sorted order.
    fn label_names(&self, ctx: &Context) -> ApiResponse<Vec<String>>;

    /// performs a query for the values of the given label.
    fn label_values(&self, ctx: &Context, label: &str) -> ApiResponse<Vec<String>>;

    /// performs an instant query at the given time.
    fn query(&self, ctx: &Context, query: &str, ts: Timestamp) -> ApiResponse<RemoteValue>;

    /// performs a query over the given range.
    fn query_range(&self, ctx: &Context, query: &str, r: Range) -> ApiResponse<RemoteValue>;

    /// finds series by label matchers.
    fn series(
        &self,
        ctx: &Context,
        matches: &[String],
        start: Timestamp,
        end: Timestamp,
    ) -> ApiResponse<Vec<LabelSet>>;

    /// loads the raw data for a given set of matchers in the time range.
    fn get_value(
        &self,
        ctx: &Context,
        start: Timestamp,
        end: Timestamp,
        matchers: &[Matcher],
    ) -> ApiResponse<RemoteValue>;
}

impl<A: Api + ?Sized> Api for std::sync::Arc<A> {
    fn label_names(&self, ctx: &Context) -> ApiResponse<Vec<String>> {
        (**self).label_names(ctx)
    }

    fn label_values(&self, ctx: &Context, label: &str) -> ApiResponse<Vec<String>> {
        (**self).label_values(ctx, label)
    }

    fn query(&self, ctx: &Context, query: &str, ts: Timestamp) -> ApiResponse<RemoteValue> {
        (**self).query(ctx, query, ts)
    }

    fn query_range(&self, ctx: &Context, query: &str, r: Range) -> ApiResponse<RemoteValue> {
        (**self).query_range(ctx, query, r)
    }

    fn series(
        &self,
        ctx: &Context,
        matches: &[String],
        start: Timestamp,
        end: Timestamp,
    ) -> ApiResponse<Vec<LabelSet>> {
        (**self).series(ctx, matches, start, end)
    }

    fn get_value(
        &self,
        ctx: &Context,
        start: Timestamp,
        end: Timestamp,
        matchers: &[Matcher],
    ) -> ApiResponse<RemoteValue> {
        (**self).get_value(ctx, start, end, matchers)
    }
}
