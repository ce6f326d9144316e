mod adapter;
mod series;
mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use scopeguard::defer;
use tracing::debug;

use crate::bridge::{convert_error, convert_warnings};
use crate::common::current_time_millis;
use crate::common::types::Timestamp;
use crate::context::Context;
use crate::error::{QuerierError, QuerierResult};
use crate::matchers::{matchers_to_string, Matcher, MatcherList};
use crate::promclient::{Api, ApiResponse, RemoteValue, VectorSample};

pub use adapter::*;
pub use series::*;
pub use types::*;

/// Querier is the read interface the query engine pulls series through.
pub trait Querier {
    /// returns the series matching all `matchers`.
    ///
    /// With `params` the series carry the samples in `[params.start, params.end]`. Without
    /// them the call only discovers series, and every returned series is empty.
    fn select(
        &self,
        params: Option<&SelectParams>,
        matchers: &[Matcher],
    ) -> StorageResponse<SeriesSet>;

    /// returns all potential values for a label name.
    fn label_values(&self, name: &str) -> StorageResponse<Vec<String>>;

    /// returns all the unique label names.
    fn label_names(&self) -> StorageResponse<Vec<String>>;

    /// releases resources held by the querier.
    fn close(&self) -> QuerierResult<()>;
}

/// ProxyQuerier serves [`Querier`] calls from a remote API.
///
/// The time window and context are fixed at construction; the window bounds series discovery
/// only, while data fetches use the bounds of each request.
pub struct ProxyQuerier<A: Api> {
    ctx: Context,
    start: Timestamp,
    end: Timestamp,
    client: A,
}

impl<A: Api> ProxyQuerier<A> {
    pub fn new(ctx: Context, client: A, start: Timestamp, end: Timestamp) -> Self {
        ProxyQuerier {
            ctx,
            start,
            end,
            client,
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn client(&self) -> &A {
        &self.client
    }

    fn check_cancelled(&self) -> QuerierResult<()> {
        if self.ctx.is_cancelled() {
            return Err(QuerierError::Cancelled);
        }
        Ok(())
    }

    /// Issues the remote call for a select.
    ///
    /// `select` combines data and metadata lookups, and the presence of `params` is the only
    /// way to tell them apart. Metadata lookups go to the series endpoint and come back as a
    /// vector of label-only samples so both paths share the same conversion.
    fn fetch_value(
        &self,
        params: Option<&SelectParams>,
        matchers: &[Matcher],
    ) -> (QuerierResult<RemoteValue>, Warnings) {
        if let Err(e) = self.check_cancelled() {
            return (Err(e), vec![]);
        }
        match params {
            None => {
                let selector = match matchers_to_string(matchers) {
                    Ok(selector) => selector,
                    Err(e) => return (Err(e), vec![]),
                };
                let (res, warnings) = self
                    .client
                    .series(&self.ctx, &[selector], self.start, self.end)
                    .into_parts();
                let value = res
                    .map(|labelsets| {
                        RemoteValue::Vector(
                            labelsets.into_iter().map(VectorSample::metadata).collect(),
                        )
                    })
                    .map_err(convert_error);
                (value, convert_warnings(warnings))
            }
            Some(params) => {
                let (res, warnings) = self
                    .client
                    .get_value(&self.ctx, params.start, params.end, matchers)
                    .into_parts();
                (res.map_err(convert_error), convert_warnings(warnings))
            }
        }
    }

    fn forward<T>(&self, call: impl FnOnce(&A, &Context) -> ApiResponse<T>) -> StorageResponse<T> {
        if let Err(e) = self.check_cancelled() {
            return StorageResponse::new(Err(e), vec![]);
        }
        let (res, warnings) = call(&self.client, &self.ctx).into_parts();
        StorageResponse::new(res.map_err(convert_error), convert_warnings(warnings))
    }
}

impl<A: Api> Querier for ProxyQuerier<A> {
    fn select(
        &self,
        params: Option<&SelectParams>,
        matchers: &[Matcher],
    ) -> StorageResponse<SeriesSet> {
        let start = Instant::now();
        defer! {
            debug!(
                select_params = ?params,
                matchers = %MatcherList(matchers),
                took = ?start.elapsed(),
                "Select"
            );
        }

        let (value, warnings) = self.fetch_value(params, matchers);
        let result = value.and_then(series_set_for_value);
        StorageResponse::new(result, warnings)
    }

    fn label_values(&self, name: &str) -> StorageResponse<Vec<String>> {
        let start = Instant::now();
        defer! {
            debug!(name = name, took = ?start.elapsed(), "LabelValues");
        }

        self.forward(|client, ctx| client.label_values(ctx, name))
    }

    fn label_names(&self) -> StorageResponse<Vec<String>> {
        let start = Instant::now();
        defer! {
            debug!(took = ?start.elapsed(), "LabelNames");
        }

        self.forward(|client, ctx| client.label_names(ctx))
    }

    /// Close is a no-op: transport resources belong to the client.
    fn close(&self) -> QuerierResult<()> {
        Ok(())
    }
}

/// Builds a [`ProxyQuerier`] per query, sharing one client between them.
pub struct ProxyQueryable<A: Api> {
    client: Arc<A>,
}

impl<A: Api> ProxyQueryable<A> {
    pub fn new(client: A) -> Self {
        ProxyQueryable {
            client: Arc::new(client),
        }
    }

    pub fn from_shared(client: Arc<A>) -> Self {
        ProxyQueryable { client }
    }

    /// returns a querier bound to `ctx` whose series discovery covers `[mint, maxt]`.
    pub fn querier(
        &self,
        ctx: Context,
        mint: Timestamp,
        maxt: Timestamp,
    ) -> ProxyQuerier<Arc<A>> {
        ProxyQuerier::new(ctx, self.client.clone(), mint, maxt)
    }

    /// returns a querier whose series discovery covers the `look_back` window ending now.
    ///
    /// Windows reaching past the earliest representable timestamp are clamped to it.
    pub fn querier_for_look_back(
        &self,
        ctx: Context,
        look_back: Duration,
    ) -> ProxyQuerier<Arc<A>> {
        let end = current_time_millis();
        let look_back = i64::try_from(look_back.as_millis()).unwrap_or(i64::MAX);
        let start = end.saturating_sub(look_back);
        self.querier(ctx, start, end)
    }
}

impl<A: Api> Clone for ProxyQueryable<A> {
    fn clone(&self) -> Self {
        ProxyQueryable {
            client: self.client.clone(),
        }
    }
}
