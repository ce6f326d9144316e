mod labels;
mod time;
pub mod types;

use std::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;

pub use labels::*;
pub use time::*;

static LABEL_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn label_name_regex() -> &'static Regex {
    LABEL_NAME_RE.get_or_init(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap())
}

/// returns true if `name` is a valid Prometheus label name.
pub fn is_valid_label_name(name: &str) -> bool {
    label_name_regex().is_match(name)
}

/// Double-quotes `value` as a PromQL string literal.
///
/// Quotes and backslashes are escaped, and so is every control character, so the literal
/// never spans lines. The output is accepted by `enquote::unquote`.
pub fn quote_label_value(value: &str) -> String {
    let mut b = String::with_capacity(value.len() + 2);
    b.push('"');
    for c in value.chars() {
        match c {
            '"' => b.push_str("\\\""),
            '\\' => b.push_str("\\\\"),
            '\n' => b.push_str("\\n"),
            '\r' => b.push_str("\\r"),
            '\t' => b.push_str("\\t"),
            '\x07' => b.push_str("\\a"),
            '\x08' => b.push_str("\\b"),
            '\x0b' => b.push_str("\\v"),
            '\x0c' => b.push_str("\\f"),
            c if c.is_ascii_control() => {
                let _ = write!(b, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(b, "\\u{:04x}", c as u32);
            }
            c => b.push(c),
        }
    }
    b.push('"');
    b
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("job", true ; "simple")]
    #[test_case("__name__", true ; "reserved")]
    #[test_case("_a1", true ; "underscore prefix")]
    #[test_case("", false ; "empty")]
    #[test_case("1abc", false ; "leading digit")]
    #[test_case("a-b", false ; "dash")]
    #[test_case("a:b", false ; "colon")]
    fn label_name_validation(name: &str, expected: bool) {
        assert_eq!(is_valid_label_name(name), expected);
    }

    #[test_case("api", r#""api""# ; "plain")]
    #[test_case(r#"say "hi""#, r#""say \"hi\"""# ; "quotes")]
    #[test_case(r"C:\tmp", r#""C:\\tmp""# ; "backslash")]
    #[test_case("a\nb\tc\r", r#""a\nb\tc\r""# ; "whitespace controls")]
    #[test_case("\x00\x1b\x7f", r#""\x00\x1b\x7f""# ; "other ascii controls")]
    #[test_case("\u{85}", r#""\u0085""# ; "unicode control")]
    #[test_case("héllo ✓", "\"héllo ✓\"" ; "printable unicode kept")]
    fn quoting(value: &str, expected: &str) {
        let quoted = quote_label_value(value);
        assert_eq!(quoted, expected);
        assert!(!quoted.contains('\n'));
        assert_eq!(enquote::unquote(&quoted).unwrap(), value);
    }
}
