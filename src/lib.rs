//! Serves a pull-based metrics query engine from a remote Prometheus-compatible API.
//!
//! [`querier::ProxyQuerier`] implements the engine's [`querier::Querier`] interface on top of
//! a [`promclient::Api`] client: selects without time bounds become series discovery calls,
//! selects with bounds become data fetches, and remote results are converted into
//! [`querier::SeriesSet`]s. [`promclient::DebugApi`] wraps any client to log its calls.

pub mod bridge;
pub mod common;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod matchers;
pub mod promclient;
pub mod querier;

pub use context::Context;
pub use error::{QuerierError, QuerierResult};
pub use matchers::{MatchOp, Matcher};
pub use querier::{ProxyQuerier, ProxyQueryable, Querier, SelectParams, SeriesSet};
