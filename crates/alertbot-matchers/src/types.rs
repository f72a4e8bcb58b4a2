//! Core matcher types.
//!
//! - [`MatchType`]: the four comparison operators
//! - [`Matcher`]: a single label comparison, with its regex compiled up front
//! - [`Matchers`]: an ordered list of matchers that must all match

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MatcherError, Result};
use crate::labels::LabelSet;

/// How a matcher compares a label value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Exact equality (`=`).
    #[serde(rename = "=")]
    Equal,
    /// Inequality (`!=`).
    #[serde(rename = "!=")]
    NotEqual,
    /// Anchored regex match (`=~`).
    #[serde(rename = "=~")]
    Regexp,
    /// Negated anchored regex match (`!~`).
    #[serde(rename = "!~")]
    NotRegexp,
}

impl MatchType {
    /// Returns the operator symbol.
    #[must_use]
    pub const fn as_symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Regexp => "=~",
            Self::NotRegexp => "!~",
        }
    }

    /// Returns true for the two regex operators.
    #[must_use]
    pub const fn is_regex(&self) -> bool {
        matches!(self, Self::Regexp | Self::NotRegexp)
    }

    /// Returns true for the two positive operators (`=` and `=~`).
    #[must_use]
    pub const fn is_equal(&self) -> bool {
        matches!(self, Self::Equal | Self::Regexp)
    }

    const fn from_flags(is_equal: bool, is_regex: bool) -> Self {
        match (is_equal, is_regex) {
            (true, false) => Self::Equal,
            (false, false) => Self::NotEqual,
            (true, true) => Self::Regexp,
            (false, true) => Self::NotRegexp,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

impl FromStr for MatchType {
    type Err = MatcherError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "=" => Ok(Self::Equal),
            "!=" => Ok(Self::NotEqual),
            "=~" => Ok(Self::Regexp),
            "!~" => Ok(Self::NotRegexp),
            other => Err(MatcherError::syntax("unknown match type", other)),
        }
    }
}

/// A single label comparison rule.
///
/// The regex for [`MatchType::Regexp`] and [`MatchType::NotRegexp`] is
/// compiled once in [`Matcher::new`], anchored as `^(?:value)$`. Matchers
/// are immutable, so the compiled form can never drift from the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ApiMatcher", into = "ApiMatcher")]
pub struct Matcher {
    match_type: MatchType,
    name: String,
    value: String,
    regex: Option<Regex>,
}

impl Matcher {
    /// Creates a matcher, compiling its regex when the type needs one.
    ///
    /// # Errors
    ///
    /// Returns `MatcherError::Pattern` if a regex value does not compile.
    pub fn new(
        match_type: MatchType,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let value = value.into();
        let regex = if match_type.is_regex() {
            let anchored = format!("^(?:{value})$");
            let compiled = Regex::new(&anchored).map_err(|source| MatcherError::Pattern {
                pattern: value.clone(),
                source,
            })?;
            Some(compiled)
        } else {
            None
        };

        Ok(Self {
            match_type,
            name: name.into(),
            value,
            regex,
        })
    }

    /// Returns the comparison operator.
    #[must_use]
    pub const fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Returns the label name this matcher inspects.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unescaped comparison value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the compiled, anchored regex for regex matchers.
    #[must_use]
    pub const fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// Checks a single label value against this matcher.
    #[must_use]
    pub fn matches_value(&self, candidate: &str) -> bool {
        match self.match_type {
            MatchType::Equal => candidate == self.value,
            MatchType::NotEqual => candidate != self.value,
            MatchType::Regexp => self.regex_matches(candidate),
            MatchType::NotRegexp => !self.regex_matches(candidate),
        }
    }

    /// Checks a label set; an absent label compares as the empty string.
    #[must_use]
    pub fn matches(&self, labels: &LabelSet) -> bool {
        let candidate = labels.get(&self.name).map_or("", String::as_str);
        self.matches_value(candidate)
    }

    /// Renders the matcher as `name<op>"escaped value"`.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn regex_matches(&self, candidate: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(candidate))
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}\"{}\"",
            self.name,
            self.match_type,
            escape_value(&self.value)
        )
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.match_type == other.match_type && self.name == other.name && self.value == other.value
    }
}

impl Eq for Matcher {}

impl PartialOrd for Matcher {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Matcher {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| self.match_type.cmp(&other.match_type))
    }
}

/// Alertmanager v1 API representation of a matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatcher {
    name: String,
    value: String,
    #[serde(default)]
    is_regex: bool,
    #[serde(default = "default_is_equal")]
    is_equal: bool,
}

const fn default_is_equal() -> bool {
    true
}

impl TryFrom<ApiMatcher> for Matcher {
    type Error = MatcherError;

    fn try_from(api: ApiMatcher) -> Result<Self> {
        Self::new(
            MatchType::from_flags(api.is_equal, api.is_regex),
            api.name,
            api.value,
        )
    }
}

impl From<Matcher> for ApiMatcher {
    fn from(m: Matcher) -> Self {
        Self {
            is_regex: m.match_type.is_regex(),
            is_equal: m.match_type.is_equal(),
            name: m.name,
            value: m.value,
        }
    }
}

/// Escapes a value the way OpenMetrics does: backslash, line feed and
/// double quote only.
#[must_use]
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '\n' => out.push_str(r"\n"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

/// An ordered list of matchers; a label set matches when every matcher does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matchers(Vec<Matcher>);

impl Matchers {
    /// Creates an empty matcher list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a matcher.
    pub fn push(&mut self, matcher: Matcher) {
        self.0.push(matcher);
    }

    /// Returns the number of matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list has no matchers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the matchers in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Matcher> {
        self.0.iter()
    }

    /// Returns the matchers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Matcher] {
        &self.0
    }

    /// Sorts by name, then value, then match type.
    pub fn sort(&mut self) {
        self.0.sort();
    }

    /// Returns true if every matcher matches the label set.
    ///
    /// An empty list matches everything.
    #[must_use]
    pub fn matches(&self, labels: &LabelSet) -> bool {
        self.0.iter().all(|m| m.matches(labels))
    }

    /// Returns the first matcher on the given label name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Matcher> {
        self.0.iter().find(|m| m.name == name)
    }
}

impl fmt::Display for Matchers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{m}")?;
        }
        f.write_str("}")
    }
}

impl From<Vec<Matcher>> for Matchers {
    fn from(matchers: Vec<Matcher>) -> Self {
        Self(matchers)
    }
}

impl FromIterator<Matcher> for Matchers {
    fn from_iter<I: IntoIterator<Item = Matcher>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Matchers {
    type Item = Matcher;
    type IntoIter = std::vec::IntoIter<Matcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Matchers {
    type Item = &'a Matcher;
    type IntoIter = std::slice::Iter<'a, Matcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
