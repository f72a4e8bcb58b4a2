//! Label matcher language for Alertmanager-style silences.
//!
//! `alertbot-matchers` parses the compact matcher syntax used to select
//! alerts, evaluates matcher lists against label sets, and renders matchers
//! back to text.
//!
//! # Features
//!
//! - **Four operators**: `=`, `!=`, `=~` and `!~`, with regexes anchored to the full value
//! - **Tolerant parsing**: optional braces, optional quotes, trailing commas
//! - **Quote-aware splitting**: commas inside `"..."` do not separate matchers
//! - **Alertmanager v1 JSON**: matchers serialize as `{name, value, isRegex, isEqual}`
//!
//! # Example
//!
//! ```rust
//! use alertbot_matchers::{parse_matchers, LabelSet, MatchType};
//!
//! let matchers = parse_matchers(r#"{alertname="HighCPU", env=~"prod|staging"}"#).unwrap();
//! assert_eq!(matchers.len(), 2);
//! assert_eq!(matchers.as_slice()[1].match_type(), MatchType::Regexp);
//!
//! let mut labels = LabelSet::new();
//! labels.insert("alertname".to_string(), "HighCPU".to_string());
//! labels.insert("env".to_string(), "staging".to_string());
//! assert!(matchers.matches(&labels));
//!
//! assert_eq!(matchers.to_string(), r#"{alertname="HighCPU",env=~"prod|staging"}"#);
//! ```
//!
//! # Rendering
//!
//! Rendering is parse-stable rather than byte-stable: the rendered form of a
//! parsed matcher parses back to an equal matcher, but a spurious escape such
//! as `\d` in the input comes back as `\\d`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod labels;
pub mod parser;
pub mod types;


// Re-export main types at crate root
pub use error::{MatcherError, Result};
pub use labels::{render_label_set, LabelSet};
pub use parser::{parse_matcher, parse_matcher_bytes, parse_matchers, parse_matchers_bytes};
pub use types::{escape_value, MatchType, Matcher, Matchers};
