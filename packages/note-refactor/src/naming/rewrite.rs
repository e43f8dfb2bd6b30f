//! Title replacement rules.

use crate::config::TitleReplacementRule;

/// Apply rules to a title, in order, each to the previous result.
///
/// Every non-overlapping occurrence of `from` is replaced, scanning left to
/// right; inserted text is not scanned again. Rules with an empty `from`
/// are skipped.
///
/// # Examples
/// ```
/// use note_refactor::config::TitleReplacementRule;
/// use note_refactor::naming::apply_rules;
///
/// let rules = [TitleReplacementRule::new(".", "-"), TitleReplacementRule::new("-", " ")];
/// assert_eq!(apply_rules("v1.2", &rules), "v1 2");
/// ```
#[must_use]
pub fn apply_rules(title: &str, rules: &[TitleReplacementRule]) -> String {
    let rewritten = rules
        .iter()
        .filter(|rule| !rule.from.is_empty())
        .fold(title.to_string(), |acc, rule| acc.replace(&rule.from, &rule.to));

    if rewritten != title {
        tracing::debug!(title, rewritten = %rewritten, "Applied title replacement rules");
    }
    rewritten
}
