//! Persistent application settings.
//!
//! Settings live in `<config dir>/tabreport/settings.json` and only hold defaults for
//! the CLI (where reports go, how CSV files are split, which format to render).
//! Report pipelines themselves are never stored.

use crate::error::{ReportError, Result, ResultExt as _};
use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Defaults applied when a CLI flag is not given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Root directory for file exports
    pub reports_dir: PathBuf,
    /// Field delimiter for CSV sources
    pub csv_delimiter: char,
    /// Format used when none is requested
    pub default_format: OutputFormat,
    /// Recipient used by the email sink when none is requested
    pub email_recipient: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            csv_delimiter: ',',
            default_format: OutputFormat::Markdown,
            email_recipient: "reports@company.com".to_owned(),
        }
    }
}

impl ReportSettings {
    /// Get the settings file path
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ReportError::Config("Failed to get config directory".to_owned()))?;
        Ok(config_dir.join("tabreport").join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load settings from a specific file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&contents).context("Failed to parse settings JSON")
    }

    /// Save settings to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save settings to a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let settings =
            ReportSettings::load_from(&dir.path().join("settings.json")).expect("load defaults");
        assert_eq!(settings, ReportSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("settings.json");
        let settings = ReportSettings {
            csv_delimiter: ';',
            default_format: OutputFormat::Html,
            ..Default::default()
        };
        settings.save_to(&path).expect("save settings");
        assert_eq!(
            ReportSettings::load_from(&path).expect("load settings"),
            settings
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "default_format": "text" }"#).expect("write settings");

        let settings = ReportSettings::load_from(&path).expect("load settings");
        assert_eq!(settings.default_format, OutputFormat::Text);
        assert_eq!(settings.csv_delimiter, ',');
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("write settings");

        let err = ReportSettings::load_from(&path).expect_err("invalid settings");
        assert!(
            err.to_string()
                .starts_with("Failed to parse settings JSON: Configuration error: JSON error:"),
            "{err}"
        );
    }

    #[test]
    fn test_unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        // A directory exists but cannot be read as a file.
        let err = ReportSettings::load_from(dir.path()).expect_err("directory is not a file");
        assert!(err.to_string().contains("I/O error"), "{err}");
    }
}
