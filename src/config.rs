//! Board configuration, read from `taskboard.toml`.
//!
//! # Configuration File Format
//!
//! ```toml
//! [board]
//! heading_suffix = "PROJECTS"
//!
//! [validation.title]
//! required = true
//! max_length = 50
//!
//! [validation.description]
//! required = true
//! min_length = 5
//! max_length = 50
//!
//! [validation.people]
//! required = true
//! min = 1
//! max = 3
//!
//! [logging]
//! level = "warn"
//! json = false
//! file = "taskboard.log"
//! ```
//!
//! A rule table that is present replaces the built-in rule for that field
//! as a whole; keys left out of it fall back to "no constraint".

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "taskboard.toml";

/// Environment variable that overrides `[logging].level`.
pub const LOG_ENV_VAR: &str = "TASKBOARD_LOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    /// Appended to each stage label in column headings ("NEW TICKET PROJECTS").
    #[serde(default = "default_heading_suffix")]
    pub heading_suffix: String,
}

fn default_heading_suffix() -> String {
    "PROJECTS".to_string()
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            heading_suffix: default_heading_suffix(),
        }
    }
}

/// Constraints on a free-text form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRule {
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Constraints on a whole-number form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRule {
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

fn default_required() -> bool {
    true
}

fn default_title_rule() -> TextRule {
    TextRule {
        required: true,
        min_length: None,
        max_length: Some(50),
    }
}

fn default_description_rule() -> TextRule {
    TextRule {
        required: true,
        min_length: Some(5),
        max_length: Some(50),
    }
}

fn default_people_rule() -> NumberRule {
    NumberRule {
        required: true,
        min: Some(1),
        max: Some(3),
    }
}

/// Input rules applied by the project form before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSection {
    #[serde(default = "default_title_rule")]
    pub title: TextRule,
    #[serde(default = "default_description_rule")]
    pub description: TextRule,
    #[serde(default = "default_people_rule")]
    pub people: NumberRule,
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            title: default_title_rule(),
            description: default_description_rule(),
            people: default_people_rule(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// `tracing` filter directive, e.g. "warn" or "taskboard=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
    /// Write logs to this file instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

/// Root of `taskboard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardToml {
    #[serde(default)]
    pub board: BoardSection,
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl BoardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse taskboard.toml")
    }

    /// Load from the first file [`locate`] finds, or fall back to defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }
        match locate(explicit) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize taskboard.toml")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Check the configuration for settings that load fine but make no sense.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (field, rule) in [
            ("title", &self.validation.title),
            ("description", &self.validation.description),
        ] {
            if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
                if min > max {
                    warnings.push(format!(
                        "validation.{}: min_length ({}) is greater than max_length ({}); no input can pass",
                        field, min, max
                    ));
                }
            }
            if rule.max_length == Some(0) && rule.required {
                warnings.push(format!(
                    "validation.{}: required but max_length is 0; no input can pass",
                    field
                ));
            }
        }

        let people = &self.validation.people;
        if let (Some(min), Some(max)) = (people.min, people.max) {
            if min > max {
                warnings.push(format!(
                    "validation.people: min ({}) is greater than max ({}); no input can pass",
                    min, max
                ));
            }
        }
        if people.min.is_none_or(|min| min < 1) {
            warnings.push(
                "validation.people: min is below 1; projects without assignees will be accepted"
                    .to_string(),
            );
        }

        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.level) {
            warnings.push(format!(
                "logging.level: '{}' is not a valid filter ({})",
                self.logging.level, e
            ));
        }

        if self.board.heading_suffix.trim().is_empty() {
            warnings.push("board.heading_suffix is empty".to_string());
        }

        warnings
    }
}

/// Per-user config location: `<config_dir>/taskboard/taskboard.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskboard").join(CONFIG_FILE_NAME))
}

/// Find the config file: explicit path, then `./taskboard.toml`, then the
/// per-user location.
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    user_config_path().filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = BoardToml::default();
        assert_eq!(config.board.heading_suffix, "PROJECTS");
        assert_eq!(config.validation.title.max_length, Some(50));
        assert_eq!(config.validation.title.min_length, None);
        assert_eq!(config.validation.description.min_length, Some(5));
        assert_eq!(config.validation.people.min, Some(1));
        assert_eq!(config.validation.people.max, Some(3));
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = BoardToml::parse("").unwrap();
        assert_eq!(config.validation, ValidationSection::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = BoardToml::parse(
            r#"
[board]
heading_suffix = "PINTEREST"

[validation.people]
min = 1
max = 5

[logging]
level = "debug"
json = true
"#,
        )
        .unwrap();
        assert_eq!(config.board.heading_suffix, "PINTEREST");
        assert_eq!(config.validation.people.max, Some(5));
        assert!(config.validation.people.required);
        // untouched rules keep their defaults
        assert_eq!(config.validation.description.min_length, Some(5));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(BoardToml::parse("[board\nheading_suffix =").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = BoardToml::default();
        config.validation.title.max_length = Some(20);
        config.save(&path).unwrap();

        let loaded = BoardToml::load(&path).unwrap();
        assert_eq!(loaded.validation.title.max_length, Some(20));
        assert_eq!(loaded.validation.people, config.validation.people);
    }

    #[test]
    fn test_load_or_default_explicit_missing_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(BoardToml::load_or_default(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_or_default_explicit_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[validation.people]\nmax = 9\n").unwrap();

        let (config, found) = BoardToml::load_or_default(Some(&path)).unwrap();
        assert_eq!(found.as_deref(), Some(path.as_path()));
        assert_eq!(config.validation.people.max, Some(9));
        // a rule table replaces the whole rule
        assert_eq!(config.validation.people.min, None);
    }

    #[test]
    fn test_validate_default_is_clean() {
        assert!(BoardToml::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_inverted_ranges() {
        let mut config = BoardToml::default();
        config.validation.description.min_length = Some(60);
        config.validation.people.min = Some(4);
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("validation.description"));
        assert!(warnings[1].contains("validation.people"));
    }

    #[test]
    fn test_validate_reports_missing_people_minimum() {
        let mut config = BoardToml::default();
        config.validation.people.min = None;
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("below 1")));
    }

    #[test]
    fn test_validate_reports_bad_log_filter() {
        let mut config = BoardToml::default();
        config.logging.level = "taskboard=loud".to_string();
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.starts_with("logging.level")));
    }
}
