use std::collections::btree_map::{BTreeMap, Iter};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::common::quote_label_value;

/// The set of label name/value pairs identifying one series.
///
/// Names are unique and iterate in sorted order. A `LabelSet` has no mutating API once built;
/// later pairs with a duplicate name replace earlier ones during construction.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        LabelSet(BTreeMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// returns the value for the label with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_str())
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        LabelSet(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for LabelSet {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for LabelSet {
    /// Prometheus string representation, e.g. `{instance="a", job="api"}`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, quote_label_value(value))?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_keep_last_value() {
        let ls: LabelSet = [("job", "a"), ("job", "b")].into();
        assert_eq!(ls.len(), 1);
        assert_eq!(ls.get("job"), Some("b"));
    }

    #[test]
    fn iterates_in_name_order() {
        let ls: LabelSet = [("z", "1"), ("a", "2"), ("m", "3")].into();
        let names: Vec<&str> = ls.names().collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn display_quotes_values() {
        let ls: LabelSet = [("job", "api"), ("path", "say \"hi\"")].into();
        assert_eq!(ls.to_string(), r#"{job="api", path="say \"hi\""}"#);
        assert_eq!(LabelSet::new().to_string(), "{}");
    }

    #[test]
    fn display_escapes_control_characters() {
        let ls: LabelSet = [("msg", "line1\nline2")].into();
        assert_eq!(ls.to_string(), r#"{msg="line1\nline2"}"#);
    }
}
