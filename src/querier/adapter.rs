use crate::error::{QuerierError, QuerierResult};
use crate::promclient::RemoteValue;
use crate::querier::{Series, SeriesSet};

/// Converts a remote value into one [`Series`] per vector sample or matrix stream, in the
/// order the remote returned them.
///
/// Vector samples without a point (series discovery results) become series with no samples.
/// Scalars and strings have no series representation.
pub fn series_for_value(value: RemoteValue) -> QuerierResult<Vec<Series>> {
    match value {
        RemoteValue::Vector(vector) => Ok(vector
            .into_iter()
            .map(|sample| match sample.point {
                Some(point) => Series::new(sample.metric, vec![point]),
                None => Series::labels_only(sample.metric),
            })
            .collect()),
        RemoteValue::Matrix(matrix) => Ok(matrix
            .into_iter()
            .map(|stream| Series::new(stream.metric, stream.values))
            .collect()),
        other @ (RemoteValue::Scalar(_) | RemoteValue::String(_)) => {
            Err(QuerierError::UnsupportedShape(other.value_type()))
        }
    }
}

pub fn series_set_for_value(value: RemoteValue) -> QuerierResult<SeriesSet> {
    series_for_value(value).map(SeriesSet::new)
}
