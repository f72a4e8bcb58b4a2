//! Parsing of the matcher syntax.
//!
//! A matcher is three tokens: a Prometheus label name, one of `=`, `!=`,
//! `=~`, `!~`, and a value that may be wrapped in double quotes. Whitespace
//! around each token is dropped. Inside the value `\"`, `\n` and `\\` are
//! escapes; a backslash before any other character stays literal. An
//! unescaped `"` is only allowed as the first or last character of the value.
//!
//! A matcher list is an optional `{`, comma separated matchers and an
//! optional `}`. Commas inside double quotes do not separate, and a trailing
//! comma is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{MatcherError, Result};
use crate::types::{MatchType, Matcher, Matchers};

/// `=~` comes before `=` so the `~` is not left over for the value.
static MATCHER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\t\n\f\r ]*([a-zA-Z_:][a-zA-Z0-9_:]*)[\t\n\f\r ]*(=~|=|!=|!~)[\t\n\f\r ]*((?s:.*?))[\t\n\f\r ]*$",
    )
    .unwrap_or_else(|_| unreachable!())
});

/// Parses a single matcher such as `env="prod"` or `code=~5..`.
///
/// # Errors
///
/// Returns `MatcherError::Syntax` if the text is not a matcher or the value
/// contains an unescaped double quote, and `MatcherError::Pattern` if a
/// regex value does not compile.
pub fn parse_matcher(input: &str) -> Result<Matcher> {
    let Some(caps) = MATCHER_REGEX.captures(input) else {
        warn!(input = %input, "rejected malformed matcher");
        return Err(MatcherError::syntax("bad matcher format", input));
    };

    let name = &caps[1];
    let match_type: MatchType = caps[2].parse()?;
    let raw_value = caps[3].strip_prefix('"').unwrap_or(&caps[3]);
    let value = unescape(raw_value)?;

    Matcher::new(match_type, name, value)
}

/// Parses a single matcher from raw bytes.
///
/// # Errors
///
/// Returns `MatcherError::Syntax` if the bytes are not valid UTF-8, otherwise
/// the same errors as [`parse_matcher`].
pub fn parse_matcher_bytes(input: &[u8]) -> Result<Matcher> {
    parse_matcher(utf8(input)?)
}

/// Parses a comma separated matcher list such as `{foo="bar", dings!="bums"}`.
///
/// The first matcher that fails to parse aborts the whole list.
///
/// # Errors
///
/// Returns the error of the first failing matcher.
pub fn parse_matchers(input: &str) -> Result<Matchers> {
    let trimmed = input.strip_prefix('{').unwrap_or(input);
    let trimmed = trimmed.strip_suffix('}').unwrap_or(trimmed);

    let matchers = split_matchers(trimmed)
        .iter()
        .map(|token| parse_matcher(token))
        .collect::<Result<Matchers>>()?;

    debug!(input = %input, count = matchers.len(), "parsed matchers");
    Ok(matchers)
}

/// Parses a matcher list from raw bytes.
///
/// # Errors
///
/// Returns `MatcherError::Syntax` if the bytes are not valid UTF-8, otherwise
/// the same errors as [`parse_matchers`].
pub fn parse_matchers_bytes(input: &[u8]) -> Result<Matchers> {
    parse_matchers(utf8(input)?)
}

fn utf8(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input).map_err(|_| {
        MatcherError::syntax(
            "matcher value not valid UTF-8",
            String::from_utf8_lossy(input),
        )
    })
}

/// Splits on commas outside double quotes.
///
/// A backslash arms a one-shot escape for the next quote; any other
/// character except a quoted comma disarms it. Only the final token is
/// trimmed and dropped when blank.
pub(crate) fn split_matchers(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut inside_quotes = false;
    let mut escaped = false;

    for c in input.chars() {
        match c {
            ',' if !inside_quotes => {
                tokens.push(std::mem::take(&mut token));
                continue;
            }
            ',' => {}
            '"' => {
                if escaped {
                    escaped = false;
                } else {
                    inside_quotes = !inside_quotes;
                }
            }
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
        token.push(c);
    }

    let last = token.trim();
    if !last.is_empty() {
        tokens.push(last.to_string());
    }
    tokens
}

fn unescape(raw: &str) -> Result<String> {
    let mut value = String::with_capacity(raw.len());
    let mut escaped = false;
    let last = raw.len().saturating_sub(1);

    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
            match c {
                'n' => value.push('\n'),
                '"' | '\\' => value.push(c),
                other => {
                    value.push('\\');
                    value.push(other);
                }
            }
            continue;
        }

        match c {
            '\\' if i < last => escaped = true,
            '\\' => value.push('\\'),
            '"' if i < last => {
                return Err(MatcherError::syntax(
                    "matcher value contains unescaped double quote",
                    raw,
                ));
            }
            // trailing quote
            '"' => {}
            other => value.push(other),
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    mod single_tests {
        use super::*;
        use test_case::test_case;

        #[test_case(r#"foo="bar""#, MatchType::Equal, "foo", "bar" ; "quoted equal")]
        #[test_case("foo=bar", MatchType::Equal, "foo", "bar" ; "bare equal")]
        #[test_case(r#"dings!="bums""#, MatchType::NotEqual, "dings", "bums" ; "not equal")]
        #[test_case(r#"statuscode=~"5..""#, MatchType::Regexp, "statuscode", "5.." ; "regexp")]
        #[test_case(r#"env!~"dev|test""#, MatchType::NotRegexp, "env", "dev|test" ; "not regexp")]
        #[test_case(r#"  foo  =  "bar"  "#, MatchType::Equal, "foo", "bar" ; "surrounding whitespace")]
        #[test_case(r#"foo="""#, MatchType::Equal, "foo", "" ; "empty quoted value")]
        #[test_case("foo=", MatchType::Equal, "foo", "" ; "empty bare value")]
        #[test_case(r#"__name__:x="y""#, MatchType::Equal, "__name__:x", "y" ; "colon and underscore name")]
        #[test_case(r#"foo=~"~bar""#, MatchType::Regexp, "foo", "~bar" ; "tilde kept in regexp value")]
        #[test_case(r#"foo="bar baz ""#, MatchType::Equal, "foo", "bar baz " ; "inner whitespace kept")]
        fn parses(input: &str, match_type: MatchType, name: &str, value: &str) {
            let m = parse_matcher(input).unwrap();
            assert_eq!(m.match_type(), match_type);
            assert_eq!(m.name(), name);
            assert_eq!(m.value(), value);
        }

        #[test]
        fn escaped_quotes() {
            let m = parse_matcher(r#"quote="She said: \"Hi\"""#).unwrap();
            assert_eq!(m.value(), r#"She said: "Hi""#);
        }

        #[test]
        fn escaped_newline_and_backslash() {
            let m = parse_matcher(r#"text="a\nb\\c""#).unwrap();
            assert_eq!(m.value(), "a\nb\\c");
        }

        #[test]
        fn spurious_escape_is_literal() {
            let m = parse_matcher(r#"path="C:\temp\d+""#).unwrap();
            assert_eq!(m.value(), r"C:\temp\d+");
        }

        #[test]
        fn trailing_backslash_is_literal() {
            let m = parse_matcher(r"path=C:\").unwrap();
            assert_eq!(m.value(), r"C:\");
        }

        #[test]
        fn literal_newline_is_tolerated() {
            let m = parse_matcher("text=\"a\nb\"").unwrap();
            assert_eq!(m.value(), "a\nb");
        }

        #[test]
        fn unicode_value() {
            let m = parse_matcher(r#"msg="Grüße, 世界""#).unwrap();
            assert_eq!(m.value(), "Grüße, 世界");
        }

        #[test_case(r#"foo="a"b""# ; "quote in the middle")]
        #[test_case(r#"foo=a"b"# ; "bare value with quote")]
        #[test_case(r#"foo="""""# ; "doubled quotes")]
        fn unescaped_quote_fails(input: &str) {
            let err = parse_matcher(input).unwrap_err();
            match err {
                MatcherError::Syntax { reason, .. } => {
                    assert!(reason.contains("unescaped double quote"));
                }
                other => panic!("expected Syntax error, got {other:?}"),
            }
        }

        #[test_case("" ; "empty")]
        #[test_case("foo" ; "no operator")]
        #[test_case("1foo=bar" ; "name starts with digit")]
        #[test_case("foo-bar=baz" ; "dash in name")]
        #[test_case("=bar" ; "missing name")]
        #[test_case("foo~bar" ; "tilde alone")]
        fn malformed_fails(input: &str) {
            let err = parse_matcher(input).unwrap_err();
            match err {
                MatcherError::Syntax { reason, input: offending } => {
                    assert_eq!(reason, "bad matcher format");
                    assert_eq!(offending, input);
                }
                other => panic!("expected Syntax error, got {other:?}"),
            }
        }

        #[test]
        fn bad_regex_is_pattern_error() {
            let err = parse_matcher(r#"foo=~"(unclosed""#).unwrap_err();
            assert!(err.is_pattern());
        }

        #[test]
        fn invalid_utf8_is_syntax_error() {
            let err = parse_matcher_bytes(b"foo=\"\xff\xfe\"").unwrap_err();
            match err {
                MatcherError::Syntax { reason, .. } => {
                    assert_eq!(reason, "matcher value not valid UTF-8");
                }
                other => panic!("expected Syntax error, got {other:?}"),
            }
        }

        #[test]
        fn valid_bytes_parse() {
            let m = parse_matcher_bytes(b"env=prod").unwrap();
            assert_eq!(m.value(), "prod");
        }

        #[test]
        fn anchored_regex_from_text() {
            let m = parse_matcher(r#"statuscode=~"5..""#).unwrap();
            assert!(m.matches_value("500"));
            assert!(m.matches_value("599"));
            assert!(!m.matches_value("50"));
            assert!(!m.matches_value("5000"));
        }

        #[test]
        fn render_reparses() {
            let m = parse_matcher(r#"path="C:\temp""#).unwrap();
            let rendered = m.render();
            assert_eq!(rendered, r#"path="C:\\temp""#);
            assert_eq!(parse_matcher(&rendered).unwrap(), m);
        }
    }

    mod list_tests {
        use super::*;
        use test_case::test_case;

        fn summary(input: &str) -> Vec<(MatchType, String, String)> {
            parse_matchers(input)
                .unwrap()
                .iter()
                .map(|m| (m.match_type(), m.name().to_string(), m.value().to_string()))
                .collect()
        }

        #[test]
        fn braces_and_spaces() {
            assert_eq!(
                summary(r#"{foo="bar", dings!="bums"}"#),
                vec![
                    (MatchType::Equal, "foo".to_string(), "bar".to_string()),
                    (MatchType::NotEqual, "dings".to_string(), "bums".to_string()),
                ]
            );
        }

        #[test_case("" ; "empty")]
        #[test_case("{}" ; "empty braces")]
        #[test_case("  " ; "blank")]
        fn empty_inputs(input: &str) {
            assert!(parse_matchers(input).unwrap().is_empty());
        }

        #[test]
        fn blank_inner_token_fails() {
            // only the trailing token is dropped when blank
            assert!(parse_matchers("{ , }").unwrap_err().is_syntax());
            assert!(parse_matchers("a=1,,b=2").unwrap_err().is_syntax());
        }

        #[test]
        fn trailing_comma_is_ignored() {
            assert_eq!(
                parse_matchers("foo=bar,dings!=bums,").unwrap(),
                parse_matchers("foo=bar,dings!=bums").unwrap()
            );
            assert_eq!(
                parse_matchers(r#"{foo = "bar", dings != "bums", }"#).unwrap(),
                parse_matchers("foo=bar, dings!=bums").unwrap()
            );
        }

        #[test]
        fn braces_trimmed_independently() {
            assert_eq!(summary("{foo=bar").len(), 1);
            assert_eq!(summary("foo=bar}").len(), 1);
            assert_eq!(summary("foo=bar}")[0].2, "bar");
        }

        #[test]
        fn comma_inside_quotes() {
            let parsed = summary(r#"{quote="She said: \"Hi, ladies! That's gender-neutral…\""}"#);
            assert_eq!(parsed.len(), 1);
            assert_eq!(parsed[0].2, r#"She said: "Hi, ladies! That's gender-neutral…""#);
        }

        #[test]
        fn escaped_backslash_before_closing_quote() {
            let parsed = summary(r#"a="x\\",b="y""#);
            assert_eq!(parsed.len(), 2);
            assert_eq!(parsed[0].2, "x\\");
            assert_eq!(parsed[1].2, "y");
        }

        #[test]
        fn order_is_preserved() {
            let names: Vec<String> = summary("z=1,a=2,m=3").into_iter().map(|t| t.1).collect();
            assert_eq!(names, vec!["z", "a", "m"]);
        }

        #[test]
        fn first_failure_aborts() {
            let err = parse_matchers(r#"foo=bar, 1bad=x, also"bad"#).unwrap_err();
            match err {
                MatcherError::Syntax { input, .. } => assert_eq!(input, " 1bad=x"),
                other => panic!("expected Syntax error, got {other:?}"),
            }
        }

        #[test]
        fn regex_list_matches_label_sets() {
            let list = parse_matchers(r#"alertname=~".+""#).unwrap();
            let mut labels = crate::LabelSet::new();
            assert!(!list.matches(&labels));
            labels.insert("alertname".to_string(), "Anything".to_string());
            assert!(list.matches(&labels));
        }

        #[test]
        fn invalid_utf8_list() {
            assert!(parse_matchers_bytes(b"a=b,c=\xc3").unwrap_err().is_syntax());
        }
    }

    mod split_tests {
        use super::*;

        #[test]
        fn splits_outside_quotes() {
            assert_eq!(
                split_matchers(r#"a="1,2",b=3"#),
                vec![r#"a="1,2""#.to_string(), "b=3".to_string()]
            );
        }

        #[test]
        fn escaped_quote_does_not_toggle() {
            assert_eq!(
                split_matchers(r#"a="x\",y",b=1"#),
                vec![r#"a="x\",y""#.to_string(), "b=1".to_string()]
            );
        }

        #[test]
        fn blank_trailing_token_dropped() {
            assert_eq!(split_matchers("a=1,  "), vec!["a=1".to_string()]);
        }

        #[test]
        fn inner_tokens_keep_whitespace() {
            assert_eq!(
                split_matchers(" a=1 , b=2 "),
                vec![" a=1 ".to_string(), "b=2".to_string()]
            );
        }
    }
}
