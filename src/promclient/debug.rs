use std::time::Instant;

use scopeguard::guard;
use serde::Serialize;
use tracing::{debug, enabled, trace, Level};

use crate::common::format_timestamp;
use crate::common::types::Timestamp;
use crate::common::LabelSet;
use crate::config::{get_global_settings, LogVerbosity};
use crate::context::Context;
use crate::matchers::Matcher;
use crate::promclient::{Api, ApiResponse, Range, RemoteValue};

/// DebugApi logs every call made through the wrapped [`Api`].
///
/// Each call is recorded at `debug` before it is issued and again with its duration once it
/// returns. Result payloads, warnings and errors are only recorded when the verbosity is
/// `trace`. Responses are passed through untouched.
pub struct DebugApi<A: Api> {
    api: A,
    prefix_message: String,
    verbosity: Option<LogVerbosity>,
}

impl<A: Api> DebugApi<A> {
    /// wraps `api`, taking the prefix message and verbosity from the global settings.
    pub fn new(api: A) -> Self {
        DebugApi {
            api,
            prefix_message: get_global_settings().debug_prefix.clone(),
            verbosity: None,
        }
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix_message = prefix.into();
        self
    }

    /// pins the verbosity instead of reading it from the global settings on every call.
    pub fn with_verbosity(mut self, verbosity: LogVerbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    pub fn prefix_message(&self) -> &str {
        &self.prefix_message
    }

    pub fn verbosity(&self) -> LogVerbosity {
        self.verbosity
            .unwrap_or_else(|| get_global_settings().log_verbosity)
    }

    pub fn inner(&self) -> &A {
        &self.api
    }

    pub fn into_inner(self) -> A {
        self.api
    }

    fn observe<T, F>(&self, api: &'static str, params: String, call: F) -> ApiResponse<T>
    where
        T: Serialize,
        F: FnOnce(&A) -> ApiResponse<T>,
    {
        let prefix = self.prefix_message.as_str();
        debug!(prefix = prefix, api = api, params = %params, "calling remote api");

        let res = {
            // logs even if the wrapped call unwinds
            let _took = guard(Instant::now(), |start| {
                debug!(prefix = prefix, api = api, took = ?start.elapsed(), "remote api returned");
            });
            call(&self.api)
        };

        if self.verbosity().records_payloads() && enabled!(Level::TRACE) {
            let (value, error) = match &res.data {
                Ok(v) => (
                    serde_json::to_string(v).unwrap_or_else(|e| format!("<unserializable: {e}>")),
                    None,
                ),
                Err(e) => (String::new(), Some(e.to_string())),
            };
            trace!(
                prefix = prefix,
                api = api,
                value = %value,
                warnings = ?res.warnings,
                error = ?error,
                "remote api result"
            );
        }

        res
    }
}

impl<A: Api> Api for DebugApi<A> {
    fn label_names(&self, ctx: &Context) -> ApiResponse<Vec<String>> {
        self.observe("LabelNames", String::new(), |api| api.label_names(ctx))
    }

    fn label_values(&self, ctx: &Context, label: &str) -> ApiResponse<Vec<String>> {
        let params = format!("label={label}");
        self.observe("LabelValues", params, |api| api.label_values(ctx, label))
    }

    fn query(&self, ctx: &Context, query: &str, ts: Timestamp) -> ApiResponse<RemoteValue> {
        let params = format!("query={query} ts={}", format_timestamp(ts));
        self.observe("Query", params, |api| api.query(ctx, query, ts))
    }

    fn query_range(&self, ctx: &Context, query: &str, r: Range) -> ApiResponse<RemoteValue> {
        let params = format!(
            "query={query} start={} end={} step={:?}",
            format_timestamp(r.start),
            format_timestamp(r.end),
            r.step
        );
        self.observe("QueryRange", params, |api| api.query_range(ctx, query, r))
    }

    fn series(
        &self,
        ctx: &Context,
        matches: &[String],
        start: Timestamp,
        end: Timestamp,
    ) -> ApiResponse<Vec<LabelSet>> {
        let params = format!(
            "matches={matches:?} startTime={} endTime={}",
            format_timestamp(start),
            format_timestamp(end)
        );
        self.observe("Series", params, |api| api.series(ctx, matches, start, end))
    }

    fn get_value(
        &self,
        ctx: &Context,
        start: Timestamp,
        end: Timestamp,
        matchers: &[Matcher],
    ) -> ApiResponse<RemoteValue> {
        let rendered = matchers.iter().map(|m| m.to_string()).collect::<Vec<_>>();
        let params = format!(
            "start={} end={} matchers={rendered:?}",
            format_timestamp(start),
            format_timestamp(end)
        );
        self.observe("GetValue", params, |api| api.get_value(ctx, start, end, matchers))
    }
}
