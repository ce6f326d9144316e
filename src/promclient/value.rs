use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::common::types::{Sample, Timestamp};
use crate::common::LabelSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Scalar,
    Vector,
    Matrix,
    String,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Scalar => "scalar",
            ValueType::Vector => "vector",
            ValueType::Matrix => "matrix",
            ValueType::String => "string",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of an instant vector.
///
/// `point` is `None` for samples synthesized from series discovery, which carry label identity
/// but no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSample {
    pub metric: LabelSet,
    pub point: Option<Sample>,
}

impl VectorSample {
    pub fn new(metric: LabelSet, timestamp: Timestamp, value: f64) -> Self {
        VectorSample {
            metric,
            point: Some(Sample::new(timestamp, value)),
        }
    }

    /// a sample carrying only label identity.
    pub fn metadata(metric: LabelSet) -> Self {
        VectorSample {
            metric,
            point: None,
        }
    }
}

/// The points of one series over a range, in strictly ascending timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStream {
    pub metric: LabelSet,
    pub values: Vec<Sample>,
}

impl SampleStream {
    pub fn new(metric: LabelSet, values: Vec<Sample>) -> Self {
        SampleStream { metric, values }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringValue {
    pub timestamp: Timestamp,
    pub value: String,
}

/// The result of a query against the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub enum RemoteValue {
    Scalar(Sample),
    Vector(Vec<VectorSample>),
    Matrix(Vec<SampleStream>),
    String(StringValue),
}

impl RemoteValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            RemoteValue::Scalar(_) => ValueType::Scalar,
            RemoteValue::Vector(_) => ValueType::Vector,
            RemoteValue::Matrix(_) => ValueType::Matrix,
            RemoteValue::String(_) => ValueType::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_names() {
        assert_eq!(RemoteValue::Scalar(Sample::new(1, 2.0)).value_type().to_string(), "scalar");
        assert_eq!(RemoteValue::Vector(vec![]).value_type(), ValueType::Vector);
        assert_eq!(RemoteValue::Matrix(vec![]).value_type(), ValueType::Matrix);
        let s = StringValue { timestamp: 1, value: "x".to_string() };
        assert_eq!(RemoteValue::String(s).value_type().as_str(), "string");
    }

    #[test]
    fn serializes_with_result_type_tag() {
        let value = RemoteValue::Vector(vec![VectorSample::metadata([("job", "api")].into())]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["resultType"], "vector");
        assert_eq!(json["result"][0]["metric"]["job"], "api");
        assert!(json["result"][0]["point"].is_null());
    }
}
