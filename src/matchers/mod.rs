mod parser;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::common::{is_valid_label_name, quote_label_value};
use crate::error::{QuerierError, QuerierResult};

pub use parser::parse_selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOp {
    Equal,
    NotEqual,
    RegexEqual,
    RegexNotEqual,
}

impl MatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOp::Equal => "=",
            MatchOp::NotEqual => "!=",
            MatchOp::RegexEqual => "=~",
            MatchOp::RegexNotEqual => "!~",
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, MatchOp::RegexEqual | MatchOp::RegexNotEqual)
    }
}

impl Display for MatchOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchOp {
    type Err = QuerierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(MatchOp::Equal),
            "!=" => Ok(MatchOp::NotEqual),
            "=~" => Ok(MatchOp::RegexEqual),
            "!~" => Ok(MatchOp::RegexNotEqual),
            _ => Err(QuerierError::Translation(format!("unknown match operator \"{s}\""))),
        }
    }
}

/// A label-name + operator + value predicate selecting series.
///
/// Regex matchers are fully anchored, as in PromQL. A matcher cannot be modified once built,
/// so the compiled pattern always agrees with the rendered value.
#[derive(Debug, Clone)]
pub struct Matcher {
    name: String,
    op: MatchOp,
    value: String,
    re: Option<Regex>,
}

impl Matcher {
    pub fn new<N, V>(op: MatchOp, name: N, value: V) -> QuerierResult<Self>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let value = value.into();
        let re = if op.is_regex() {
            let anchored = format!("^(?:{value})$");
            let re = Regex::new(&anchored).map_err(|e| {
                QuerierError::Translation(format!("invalid regex \"{value}\": {e}"))
            })?;
            Some(re)
        } else {
            None
        };
        Ok(Matcher {
            name: name.into(),
            op,
            value,
            re,
        })
    }

    pub fn equal<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Matcher {
            name: name.into(),
            op: MatchOp::Equal,
            value: value.into(),
            re: None,
        }
    }

    pub fn not_equal<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Matcher {
            name: name.into(),
            op: MatchOp::NotEqual,
            value: value.into(),
            re: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn op(&self) -> MatchOp {
        self.op
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// returns true if `value` satisfies the matcher. A missing label matches as "".
    pub fn matches(&self, value: &str) -> bool {
        match (&self.op, &self.re) {
            (MatchOp::Equal, _) => self.value == value,
            (MatchOp::NotEqual, _) => self.value != value,
            (MatchOp::RegexEqual, Some(re)) => re.is_match(value),
            (MatchOp::RegexNotEqual, Some(re)) => !re.is_match(value),
            // regex matchers are always built with a compiled pattern
            (MatchOp::RegexEqual | MatchOp::RegexNotEqual, None) => false,
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.op == other.op && self.value == other.value
    }
}

impl Eq for Matcher {}

impl Display for Matcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.name, self.op, quote_label_value(&self.value))
    }
}

/// Lazily renders a matcher list for logging, e.g. `[job="api", instance!="a"]`.
pub struct MatcherList<'a>(pub &'a [Matcher]);

impl Display for MatcherList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{m}")?;
        }
        f.write_str("]")
    }
}

/// Renders `matchers` as a single series selector, e.g. `{job="api", path=~"/v1/.*"}`.
///
/// The matchers are ANDed together in the order given.
pub fn matchers_to_string(matchers: &[Matcher]) -> QuerierResult<String> {
    if matchers.is_empty() {
        return Err(QuerierError::Translation(
            "at least one matcher is required".to_string(),
        ));
    }
    let capacity = matchers
        .iter()
        .map(|m| m.name.len() + m.value.len() + 6)
        .sum::<usize>();
    let mut b = String::with_capacity(capacity + 2);
    b.push('{');
    for (i, m) in matchers.iter().enumerate() {
        if !is_valid_label_name(&m.name) {
            return Err(QuerierError::Translation(format!(
                "invalid label name \"{}\"",
                m.name
            )));
        }
        if i > 0 {
            b.push_str(", ");
        }
        b.push_str(&m.to_string());
    }
    b.push('}');
    Ok(b)
}
