//! Note naming: title rewriting, sanitization and de-duplication.

mod dedup;
mod rewrite;
mod sanitize;

use chrono::NaiveDateTime;

pub use dedup::ensure_unique;
pub use rewrite::apply_rules;
pub use sanitize::{fallback_name, sanitize};

use crate::config::Settings;
use crate::template::expand_dates;

/// File-name prefix with its date placeholders rendered.
#[must_use]
pub fn file_name_prefix(settings: &Settings, now: NaiveDateTime) -> String {
    expand_dates(&settings.file_name_prefix, now)
}

/// Candidate name for a note titled `title`, before de-duplication.
///
/// Rewrite rules see the raw title; the rendered prefix is prepended to the
/// title without its heading marker and the result is sanitized as a
/// whole.
#[must_use]
pub fn candidate_name(
    title: &str,
    settings: &Settings,
    now: NaiveDateTime,
    fallback_index: usize,
) -> String {
    let rewritten = apply_rules(title, &settings.title_replacement_rules);
    let title = sanitize::strip_heading_marker(&rewritten);
    let prefix = file_name_prefix(settings, now);
    sanitize(&format!("{prefix}{title}"), fallback_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TitleReplacementRule;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 20)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_candidate_name_plain() {
        let settings = Settings::default();
        assert_eq!(candidate_name("## Sub", &settings, now(), 0), "Sub");
        assert_eq!(candidate_name("Foo/Bar", &settings, now(), 0), "Foo-Bar");
    }

    #[test]
    fn test_candidate_name_with_prefix() {
        let settings = Settings {
            file_name_prefix: "{{date:YYYYMMDD}} ".to_string(),
            ..Settings::default()
        };
        assert_eq!(candidate_name("# Idea", &settings, now(), 0), "20231120 Idea");
        // Autogenerated names are the prefix alone
        assert_eq!(candidate_name("", &settings, now(), 0), "20231120");
    }

    #[test]
    fn test_candidate_name_rules_before_sanitize() {
        let settings = Settings {
            title_replacement_rules: vec![TitleReplacementRule::new(":", " -")],
            ..Settings::default()
        };
        assert_eq!(
            candidate_name("# Q3: Plans", &settings, now(), 0),
            "Q3 - Plans"
        );
    }

    #[test]
    fn test_candidate_name_never_empty() {
        let settings = Settings {
            title_replacement_rules: vec![TitleReplacementRule::new("Gone", "")],
            ..Settings::default()
        };
        assert_eq!(candidate_name("## Gone", &settings, now(), 4), "Untitled 4");
        assert_eq!(candidate_name("", &Settings::default(), now(), 0), "Untitled");
    }

    #[test]
    fn test_file_name_prefix() {
        let settings = Settings {
            file_name_prefix: "{{date:YYYY}}/".to_string(),
            ..Settings::default()
        };
        assert_eq!(file_name_prefix(&settings, now()), "2023/");
        assert_eq!(file_name_prefix(&Settings::default(), now()), "");
    }
}
