//! Conversions of warnings and errors from the remote client's types into the querier's.

use tracing::debug;

use crate::error::QuerierError;
use crate::promclient::{ApiError, ApiWarnings};
use crate::querier::{Warning, Warnings};

/// Converts remote warnings element-wise. Count and order are preserved.
pub fn convert_warnings(warnings: ApiWarnings) -> Warnings {
    warnings.into_iter().map(Warning).collect()
}

/// Converts a remote error into a [`QuerierError`], keeping only its root cause.
///
/// `QuerierError` has no notion of a cause chain, so any context the client wrapped around the
/// root cause is dropped. The dropped chain is logged at `debug`.
pub fn convert_error(err: ApiError) -> QuerierError {
    if err.is_wrapped() {
        debug!(error = %err, context = ?err.context_chain(), "discarding remote error context");
    }
    match err.cause() {
        ApiError::Canceled => QuerierError::Cancelled,
        root => QuerierError::Remote(root),
    }
}

impl From<ApiError> for QuerierError {
    fn from(err: ApiError) -> Self {
        convert_error(err)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_warnings() {
        assert!(convert_warnings(vec![]).is_empty());
    }

    #[test]
    fn warnings_keep_order_and_duplicates() {
        let warnings = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        let converted = convert_warnings(warnings);
        let messages: Vec<&str> = converted.iter().map(|w| w.message()).collect();
        assert_eq!(messages, vec!["b", "a", "b"]);
    }

    #[test]
    fn doubly_wrapped_error_yields_root_cause() {
        let root = ApiError::BadData("parse error at char 3".to_string());
        let wrapped = root.clone().context("query_range").context("proxy");
        assert_eq!(convert_error(wrapped), QuerierError::Remote(root));
    }

    #[test]
    fn unwrapped_error_is_forwarded() {
        let root = ApiError::Server("503 Service Unavailable".to_string());
        assert_eq!(QuerierError::from(root.clone()), QuerierError::Remote(root));
    }

    #[test]
    fn cancellation_maps_to_cancelled() {
        assert_eq!(convert_error(ApiError::Canceled), QuerierError::Cancelled);
        assert_eq!(
            convert_error(ApiError::Canceled.context("series")),
            QuerierError::Cancelled
        );
    }

    proptest! {
        #[test]
        fn warnings_bijective(warnings in prop::collection::vec(".*", 0..20)) {
            let converted = convert_warnings(warnings.clone());
            prop_assert_eq!(converted.len(), warnings.len());
            for (w, original) in converted.iter().zip(warnings.iter()) {
                prop_assert_eq!(w.message(), original.as_str());
            }
        }

        #[test]
        fn any_wrapping_depth_yields_root(depth in 0usize..8, msg in "[a-z ]{0,20}") {
            let root = ApiError::Execution(msg);
            let mut err = root.clone();
            for i in 0..depth {
                err = err.context(format!("layer {i}"));
            }
            prop_assert_eq!(convert_error(err), QuerierError::Remote(root));
        }
    }
}
