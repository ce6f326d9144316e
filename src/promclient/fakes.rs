use std::sync::Mutex;

use crate::common::types::Timestamp;
use crate::common::LabelSet;
use crate::context::Context;
use crate::matchers::Matcher;
use crate::promclient::{Api, ApiError, ApiResponse, Range, RemoteValue};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    LabelNames,
    LabelValues(String),
    Query { query: String, ts: Timestamp },
    QueryRange { query: String, range: Range },
    Series { matches: Vec<String>, start: Timestamp, end: Timestamp },
    GetValue { start: Timestamp, end: Timestamp, matchers: Vec<Matcher> },
}

struct FakeApiInner {
    calls: Vec<RecordedCall>,
    label_names: ApiResponse<Vec<String>>,
    label_values: ApiResponse<Vec<String>>,
    series: ApiResponse<Vec<LabelSet>>,
    value: ApiResponse<RemoteValue>,
}

/// Canned-response [`Api`] that records every call it receives.
pub struct FakeApi {
    inner: Mutex<FakeApiInner>,
}

impl FakeApi {
    pub fn new() -> Self {
        let inner = FakeApiInner {
            calls: vec![],
            label_names: ApiResponse::ok(vec![]),
            label_values: ApiResponse::ok(vec![]),
            series: ApiResponse::ok(vec![]),
            value: ApiResponse::ok(RemoteValue::Matrix(vec![])),
        };
        Self { inner: Mutex::new(inner) }
    }

    pub fn set_label_names_response(&self, res: ApiResponse<Vec<String>>) {
        self.inner.lock().unwrap().label_names = res;
    }

    pub fn set_label_values_response(&self, res: ApiResponse<Vec<String>>) {
        self.inner.lock().unwrap().label_values = res;
    }

    pub fn set_series_response(&self, res: ApiResponse<Vec<LabelSet>>) {
        self.inner.lock().unwrap().series = res;
    }

    /// response for `query`, `query_range` and `get_value`.
    pub fn set_value_response(&self, res: ApiResponse<RemoteValue>) {
        self.inner.lock().unwrap().value = res;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record<T: Clone>(
        &self,
        ctx: &Context,
        call: RecordedCall,
        pick: impl FnOnce(&FakeApiInner) -> &ApiResponse<T>,
    ) -> ApiResponse<T> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if ctx.is_cancelled() {
            return ApiResponse::err(ApiError::Canceled.context("fake api"));
        }
        pick(&*inner).clone()
    }
}

impl Api for FakeApi {
    fn label_names(&self, ctx: &Context) -> ApiResponse<Vec<String>> {
        self.record(ctx, RecordedCall::LabelNames, |inner| &inner.label_names)
    }

    fn label_values(&self, ctx: &Context, label: &str) -> ApiResponse<Vec<String>> {
        let call = RecordedCall::LabelValues(label.to_string());
        self.record(ctx, call, |inner| &inner.label_values)
    }

    fn query(&self, ctx: &Context, query: &str, ts: Timestamp) -> ApiResponse<RemoteValue> {
        let call = RecordedCall::Query { query: query.to_string(), ts };
        self.record(ctx, call, |inner| &inner.value)
    }

    fn query_range(&self, ctx: &Context, query: &str, range: Range) -> ApiResponse<RemoteValue> {
        let call = RecordedCall::QueryRange { query: query.to_string(), range };
        self.record(ctx, call, |inner| &inner.value)
    }

    fn series(
        &self,
        ctx: &Context,
        matches: &[String],
        start: Timestamp,
        end: Timestamp,
    ) -> ApiResponse<Vec<LabelSet>> {
        let call = RecordedCall::Series { matches: matches.to_vec(), start, end };
        self.record(ctx, call, |inner| &inner.series)
    }

    fn get_value(
        &self,
        ctx: &Context,
        start: Timestamp,
        end: Timestamp,
        matchers: &[Matcher],
    ) -> ApiResponse<RemoteValue> {
        let call = RecordedCall::GetValue { start, end, matchers: matchers.to_vec() };
        self.record(ctx, call, |inner| &inner.value)
    }
}
