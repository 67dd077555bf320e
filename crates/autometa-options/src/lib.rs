//! Generation options and configuration loading for autometa.
//!
//! Options are an explicit, immutable value passed into every generation
//! call. Config files may omit any field; missing fields take the documented
//! defaults and the result is validated once at load time.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default maximum description length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 160;

/// Default separator placed between the title and the body summary.
pub const DEFAULT_SEPARATOR: &str = " - ";

/// Configuration format types supported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    #[default]
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension. Unknown extensions read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Options controlling how a meta description is composed and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Maximum length of the description in characters (not bytes).
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Placed between the title and the body summary.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Lead with the article title.
    #[serde(default = "default_true")]
    pub include_title: bool,

    /// Append the cleaned body text.
    #[serde(default = "default_true")]
    pub include_body: bool,

    /// Replace descriptions that are already set when an article is saved.
    #[serde(default)]
    pub overwrite_existing: bool,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            separator: default_separator(),
            include_title: true,
            include_body: true,
            overwrite_existing: false,
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_title(mut self, include_title: bool) -> Self {
        self.include_title = include_title;
        self
    }

    pub fn with_body(mut self, include_body: bool) -> Self {
        self.include_body = include_body;
        self
    }

    pub fn with_overwrite_existing(mut self, overwrite_existing: bool) -> Self {
        self.overwrite_existing = overwrite_existing;
        self
    }

    /// Reject option values the generator cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            bail!("max_length must be a positive integer");
        }
        Ok(())
    }
}

/// Parse options from a string in the given format, then validate them.
pub fn parse_options(contents: &str, format: ConfigFormat) -> Result<GenerationOptions> {
    let options: GenerationOptions = match format {
        ConfigFormat::Json => {
            serde_json::from_str(contents).context("Failed to parse JSON config")?
        }
        ConfigFormat::Yaml if contents.trim().is_empty() => GenerationOptions::default(),
        ConfigFormat::Yaml => {
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?
        }
    };
    options.validate()?;
    Ok(options)
}

/// Load options from a file; the format follows the extension.
pub fn load_options(path: impl AsRef<Path>) -> Result<GenerationOptions> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read config {path:?}"))?;
    parse_options(&contents, ConfigFormat::from_path(path))
        .with_context(|| format!("load config {path:?}"))
}

/// Save options to a file; the format follows the extension.
pub fn save_options(options: &GenerationOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let contents = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::to_string_pretty(options)
            .context("Failed to serialize JSON config")?,
        ConfigFormat::Yaml => {
            serde_yaml::to_string(options).context("Failed to serialize YAML config")?
        }
    };

    std::fs::write(path, contents).with_context(|| format!("write config {path:?}"))?;
    Ok(())
}
