//! Content configuration from sectionmark.toml

use crate::content_model::ParseOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in a content directory
pub const CONFIG_FILE_NAME: &str = "sectionmark.toml";

/// Main configuration from sectionmark.toml
///
/// Every table and field is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Parser behaviour
    pub parser: ParserSettings,

    /// Which files count as content sources
    pub sources: SourceSettings,

    /// How parse results are written
    pub output: OutputSettings,
}

/// Parser behaviour settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Emit a code block still open at end of input instead of dropping it
    pub flush_unterminated_code: bool,
}

/// Source discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// File extensions (without the dot) treated as markdown
    pub extensions: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Indent JSON output
    pub pretty: bool,

    /// Extension given to written result files
    pub extension: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            extension: "json".to_string(),
        }
    }
}

/// Errors that can occur when loading or saving content configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error for {path}: {source}", path = .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}", path = .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TOML serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl ContentConfig {
    /// Load configuration from a sectionmark.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ContentConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ContentConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(config)
    }

    /// Load `sectionmark.toml` from a directory, or defaults when it has none
    pub fn load_or_default<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.is_file() {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.as_ref().display());
            return Ok(Self::default());
        }

        log::info!("Loading configuration from {}", path.display());
        Self::load(&path)
    }

    /// Save configuration to a sectionmark.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(ConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Parser options described by this configuration
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            flush_unterminated_code: self.parser.flush_unterminated_code,
        }
    }

    /// Whether a path has one of the configured source extensions
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.sources
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}
