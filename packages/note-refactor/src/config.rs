//! Configuration constants, settings and validation.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::{RefactorError, Result};

/// Heading marker prepended to the first line when it becomes the note heading.
pub const HEADING_FORMAT: &str = "#";

/// Settings file looked up in the vault root.
pub const CONFIG_FILE_NAME: &str = ".note-refactor.yaml";

/// Environment variable pointing at a settings file.
pub const CONFIG_ENV_VAR: &str = "NOTE_REFACTOR_CONFIG";

/// Extension of notes written to the vault.
pub const NOTE_EXTENSION: &str = "md";

/// Name used when sanitization leaves nothing usable.
pub const DEFAULT_NOTE_NAME: &str = "Untitled";

/// Upper bound on note names, in UTF-8 bytes.
///
/// Leaves room under the 255 byte file-name limit for a `" (n)"` suffix,
/// the `.md` extension and the `.<name>.md.tmp` file used while writing.
pub const MAX_NAME_BYTES: usize = 232;

/// Upper bound on the `" (n)"` suffix search during de-duplication.
pub const MAX_DEDUP_ATTEMPTS: u32 = 10_000;

/// Deepest markdown heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Default format for a bare `{{date}}` placeholder.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// ATX heading line: 1-6 `#` followed by whitespace or end of line.
/// Captures: (1) the marker, (2) the remaining text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})(?:\s(.*))?$").expect("valid regex"));

/// Template placeholder `{{name}}` or `{{name:argument}}`.
/// Captures: (1) the name, (2) the optional argument.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-z_]+)\s*(?::([^{}]*))?\}\}").expect("valid regex")
});

/// Where newly created notes are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    /// Vault root.
    #[default]
    #[serde(alias = "vault-root")]
    VaultFolder,

    /// Same folder as the note being refactored.
    SameFolder,

    /// The folder named by `customFolder`.
    SpecifiedFolder,
}

/// Link syntax used for generated links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStyle {
    /// `[[name]]`
    #[default]
    Wiki,

    /// `[name](path.md)`
    Markdown,
}

/// Literal find/replace pair applied to titles before they become file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleReplacementRule {
    pub from: String,
    pub to: String,
}

impl TitleReplacementRule {
    /// Create a new rule.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// User settings, mirroring the keys of the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub include_first_line_as_note_heading: bool,
    pub exclude_first_line_in_note: bool,
    pub open_new_note: bool,
    pub heading_format: String,
    pub new_file_location: Location,
    pub custom_folder: String,
    pub file_name_prefix: String,
    pub transclude_by_default: bool,
    pub note_link_template: String,
    pub refactored_note_template: String,
    pub normalize_header_levels: bool,
    #[serde(deserialize_with = "deserialize_rules")]
    pub title_replacement_rules: Vec<TitleReplacementRule>,
    pub use_embedding_type: bool,
    pub link_style: LinkStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_first_line_as_note_heading: false,
            exclude_first_line_in_note: false,
            open_new_note: true,
            heading_format: HEADING_FORMAT.to_string(),
            new_file_location: Location::VaultFolder,
            custom_folder: String::new(),
            file_name_prefix: String::new(),
            transclude_by_default: false,
            note_link_template: String::new(),
            refactored_note_template: String::new(),
            normalize_header_levels: false,
            title_replacement_rules: Vec::new(),
            use_embedding_type: false,
            link_style: LinkStyle::Wiki,
        }
    }
}

/// A rule entry as written by the user; anything but a `from`/`to` string
/// pair is dropped.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRule {
    Pair {
        from: Option<String>,
        to: Option<String>,
    },
    Other(serde_yaml_ng::Value),
}

fn deserialize_rules<'de, D>(deserializer: D) -> std::result::Result<Vec<TitleReplacementRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<RawRule>> = Option::deserialize(deserializer)?;
    let rules = raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, rule)| match rule {
            RawRule::Pair {
                from: Some(from),
                to: Some(to),
            } => Some(TitleReplacementRule { from, to }),
            _ => {
                tracing::warn!(index, "Skipping malformed title replacement rule");
                None
            }
        })
        .collect();
    Ok(rules)
}

impl Settings {
    /// Parse settings from YAML text and validate them.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid "all defaults" file
        let settings: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Self::from_yaml(&yaml)
    }

    /// Resolve settings for a vault.
    ///
    /// Lookup order: explicit path, `NOTE_REFACTOR_CONFIG`, the vault's
    /// `.note-refactor.yaml`, then defaults.
    pub fn discover(explicit: Option<&Path>, vault: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
            return Self::load(&path);
        }

        let in_vault = vault.join(CONFIG_FILE_NAME);
        if in_vault.is_file() {
            return Self::load(&in_vault);
        }

        tracing::debug!("No settings file found, using defaults");
        Ok(Self::default())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.new_file_location == Location::SpecifiedFolder
            && self.custom_folder.trim().is_empty()
        {
            return Err(RefactorError::InvalidSettings(
                "newFileLocation is specified-folder but customFolder is empty".to_string(),
            ));
        }

        if !self.heading_format.chars().all(|c| c == '#') {
            return Err(RefactorError::InvalidSettings(format!(
                "headingFormat '{}' may only contain '#'",
                self.heading_format
            )));
        }

        if self.heading_format.len() > usize::from(MAX_HEADING_LEVEL) {
            return Err(RefactorError::InvalidSettings(format!(
                "headingFormat '{}' is deeper than level {MAX_HEADING_LEVEL}",
                self.heading_format
            )));
        }

        let folder = Path::new(&self.custom_folder);
        if folder.is_absolute()
            || folder
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(RefactorError::InvalidSettings(format!(
                "customFolder '{}' must be a relative path inside the vault",
                self.custom_folder
            )));
        }

        Ok(())
    }
}

/// Validate a heading level for splitting.
///
/// # Examples
/// ```
/// use note_refactor::config::validate_heading_level;
///
/// assert!(validate_heading_level(2).is_ok());
/// assert!(validate_heading_level(0).is_err());
/// assert!(validate_heading_level(7).is_err());
/// ```
pub fn validate_heading_level(level: u8) -> Result<()> {
    if (1..=MAX_HEADING_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(RefactorError::InvalidHeadingLevel(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.open_new_note);
        assert_eq!(settings.heading_format, "#");
        assert_eq!(settings.new_file_location, Location::VaultFolder);
        assert_eq!(settings.link_style, LinkStyle::Wiki);
        assert!(settings.title_replacement_rules.is_empty());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        assert_eq!(Settings::from_yaml("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_yaml_camel_case_keys() {
        let yaml = r###"
includeFirstLineAsNoteHeading: true
headingFormat: "##"
newFileLocation: specified-folder
customFolder: refactored
fileNamePrefix: "{{date:YYYYMMDD}}-"
noteLinkTemplate: "See {{new_note_link}}"
normalizeHeaderLevels: true
linkStyle: markdown
"###;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert!(settings.include_first_line_as_note_heading);
        assert_eq!(settings.heading_format, "##");
        assert_eq!(settings.new_file_location, Location::SpecifiedFolder);
        assert_eq!(settings.custom_folder, "refactored");
        assert_eq!(settings.file_name_prefix, "{{date:YYYYMMDD}}-");
        assert_eq!(settings.note_link_template, "See {{new_note_link}}");
        assert!(settings.normalize_header_levels);
        assert_eq!(settings.link_style, LinkStyle::Markdown);
        // Unset keys keep their defaults
        assert!(settings.open_new_note);
    }

    #[test]
    fn test_rules_keep_order_and_skip_malformed() {
        let yaml = r#"
titleReplacementRules:
  - from: ":"
    to: " -"
  - from: "?"
  - just a string
  - from: "&"
    to: "and"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(
            settings.title_replacement_rules,
            vec![
                TitleReplacementRule::new(":", " -"),
                TitleReplacementRule::new("&", "and"),
            ]
        );
    }

    #[test]
    fn test_location_accepts_vault_root() {
        let settings = Settings::from_yaml("newFileLocation: vault-root\n").unwrap();
        assert_eq!(settings.new_file_location, Location::VaultFolder);
        let settings = Settings::from_yaml("newFileLocation: vault-folder\n").unwrap();
        assert_eq!(settings.new_file_location, Location::VaultFolder);
    }

    #[test]
    fn test_null_rules_is_empty() {
        let settings = Settings::from_yaml("titleReplacementRules: ~\n").unwrap();
        assert!(settings.title_replacement_rules.is_empty());
    }

    #[test]
    fn test_specified_folder_requires_custom_folder() {
        let result = Settings::from_yaml("newFileLocation: specified-folder\n");
        assert!(matches!(result, Err(RefactorError::InvalidSettings(_))));
    }

    #[test]
    fn test_heading_format_must_be_hashes() {
        assert!(Settings::from_yaml("headingFormat: \"-\"\n").is_err());
        assert!(Settings::from_yaml("headingFormat: \"#######\"\n").is_err());
        assert!(Settings::from_yaml("headingFormat: \"\"\n").is_ok());
    }

    #[test]
    fn test_custom_folder_must_stay_in_vault() {
        let yaml = "newFileLocation: specified-folder\ncustomFolder: ../outside\n";
        assert!(Settings::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_unknown_location_is_error() {
        assert!(matches!(
            Settings::from_yaml("newFileLocation: desktop\n"),
            Err(RefactorError::Yaml(_))
        ));
    }

    #[test]
    fn test_validate_heading_level() {
        for level in 1..=6 {
            assert!(validate_heading_level(level).is_ok());
        }
        assert!(validate_heading_level(0).is_err());
        assert!(validate_heading_level(7).is_err());
    }

    #[test]
    fn test_heading_line_regex() {
        let caps = HEADING_LINE.captures("## Sub").unwrap();
        assert_eq!(&caps[1], "##");
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("Sub"));

        assert!(HEADING_LINE.is_match("#"));
        assert!(HEADING_LINE.is_match("## "));
        assert!(!HEADING_LINE.is_match("##Sub"));
        assert!(!HEADING_LINE.is_match("####### too deep"));
        assert!(!HEADING_LINE.is_match(" # indented"));
    }

    #[test]
    fn test_discover_explicit_and_vault_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "openNewNote: false\n").unwrap();
        let explicit = dir.path().join("other.yaml");
        std::fs::write(&explicit, "transcludeByDefault: true\n").unwrap();

        let from_explicit = Settings::discover(Some(&explicit), dir.path()).unwrap();
        assert!(from_explicit.transclude_by_default);
        assert!(from_explicit.open_new_note);

        // Only falls through to the vault file when the env var is unset
        if std::env::var_os(CONFIG_ENV_VAR).is_none() {
            let from_vault = Settings::discover(None, dir.path()).unwrap();
            assert!(!from_vault.open_new_note);
        }
    }
}
