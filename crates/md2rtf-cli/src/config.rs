//! Configuration file support for md2rtf CLI
//!
//! Loads settings from `_md2rtf.toml` configuration file.

use anyhow::{Context, Result};
use md2rtf_core::RtfOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_md2rtf.toml";

/// Schema URL for the configuration file
///
/// Points at `schema/md2rtf.schema.json` in this crate, the committed
/// output of `md2rtf init --schema`.
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/eitsupi/md2rtf/main/crates/md2rtf-cli/schema/md2rtf.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Output configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "rtf" or "txt" (plain text) (default: "rtf")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    /// Wrap output in the RTF document envelope (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<bool>,
    /// Insert an empty paragraph after each block (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacer_paragraphs: Option<bool>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.format.is_none() && self.envelope.is_none() && self.spacer_paragraphs.is_none()
    }
}

/// Output file format
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Rtf,
    /// Plain text with all markup removed
    Txt,
}

impl OutputFormat {
    /// File extension for converted files
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Rtf => "rtf",
            OutputFormat::Txt => "txt",
        }
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_md2rtf.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Writer options from the file, falling back to the library defaults
    pub fn rtf_options(&self) -> RtfOptions {
        let defaults = RtfOptions::default();
        RtfOptions {
            envelope: self.output.envelope.unwrap_or(defaults.envelope),
            spacer_paragraphs: self
                .output
                .spacer_paragraphs
                .unwrap_or(defaults.spacer_paragraphs),
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with the defaults spelled out, for the init command
    pub fn sample() -> Self {
        Config {
            output: OutputConfig {
                format: Some(OutputFormat::Rtf),
                envelope: Some(true),
                spacer_paragraphs: Some(true),
            },
        }
    }
}
