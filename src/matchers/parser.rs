use enquote::unquote;
use nom::branch::alt;
use nom::bytes::complete::{escaped, tag};
use nom::character::complete::{alpha1, alphanumeric1, anychar, char, multispace0, none_of};
use nom::combinator::{all_consuming, map_res, opt, recognize, value};
use nom::multi::{many0_count, separated_list1};
use nom::sequence::{delimited, pair, terminated, tuple};
use nom::IResult;

use crate::error::{QuerierError, QuerierResult};
use crate::matchers::{MatchOp, Matcher};

fn label_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn match_op(input: &str) -> IResult<&str, MatchOp> {
    // two character operators first so "=~" is not read as "="
    alt((
        value(MatchOp::RegexEqual, tag("=~")),
        value(MatchOp::RegexNotEqual, tag("!~")),
        value(MatchOp::NotEqual, tag("!=")),
        value(MatchOp::Equal, tag("=")),
    ))(input)
}

fn quoted_value(input: &str) -> IResult<&str, String> {
    map_res(
        recognize(delimited(
            char('"'),
            opt(escaped(none_of("\\\""), '\\', anychar)),
            char('"'),
        )),
        unquote,
    )(input)
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn label_matcher(input: &str) -> IResult<&str, (&str, MatchOp, String)> {
    tuple((ws(label_name), ws(match_op), ws(quoted_value)))(input)
}

fn selector(input: &str) -> IResult<&str, Vec<(&str, MatchOp, String)>> {
    delimited(
        ws(char('{')),
        terminated(separated_list1(char(','), label_matcher), opt(char(','))),
        ws(char('}')),
    )(input)
}

/// Parses a series selector of the form `{name<op>"value", ...}` back into matchers.
pub fn parse_selector(input: &str) -> QuerierResult<Vec<Matcher>> {
    let (_, parsed) = all_consuming(selector)(input).map_err(|e| {
        QuerierError::Translation(format!("cannot parse selector {input}: {e}"))
    })?;
    parsed
        .into_iter()
        .map(|(name, op, value)| Matcher::new(op, name, value))
        .collect()
}
