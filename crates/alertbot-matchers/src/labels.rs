//! Label sets and their textual form.

use std::collections::HashMap;

use crate::types::escape_value;

/// Label name to label value mapping attached to an alert.
pub type LabelSet = HashMap<String, String>;

/// Renders a label set as `{name="value", ...}` with names sorted.
///
/// The output is accepted by [`crate::parse_matchers`] and yields one
/// equality matcher per label.
#[must_use]
pub fn render_label_set(labels: &LabelSet) -> String {
    let mut sorted: Vec<_> = labels.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let pairs: Vec<String> = sorted
        .into_iter()
        .map(|(k, v)| format!("{k}=\"{}\"", escape_value(v)))
        .collect();

    format!("{{{}}}", pairs.join(", "))
}
