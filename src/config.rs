//! Configuration for word sources, the game API, and timeouts.

use crate::definitions::DEFAULT_DEFINITION_TIMEOUT;
use crate::word_list::DEFAULT_WORD_LIST_URL;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "WORDS_CONFIG";

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct WordsConfig {
    /// URL of the newline-separated word list.
    #[serde(default = "default_word_list_url")]
    word_list_url: String,

    /// Local word list; takes precedence over the URL when set.
    #[serde(default)]
    word_list_path: Option<PathBuf>,

    /// Base URL of the definition and high-score API.
    #[serde(default = "default_api_base_url")]
    api_base_url: String,

    /// Seconds before a definition lookup is abandoned.
    #[serde(default = "default_definition_timeout_secs")]
    definition_timeout_secs: u64,

    /// Seconds before any other HTTP request is abandoned.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// Name used for high-score submissions.
    #[serde(default)]
    player_name: Option<String>,
}

#[instrument]
fn default_word_list_url() -> String {
    DEFAULT_WORD_LIST_URL.to_string()
}

#[instrument]
fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

#[instrument]
fn default_definition_timeout_secs() -> u64 {
    DEFAULT_DEFINITION_TIMEOUT.as_secs()
}

#[instrument]
fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            word_list_url: default_word_list_url(),
            word_list_path: None,
            api_base_url: default_api_base_url(),
            definition_timeout_secs: default_definition_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            player_name: None,
        }
    }
}

impl WordsConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(api = %config.api_base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path`, else from the file named by [`CONFIG_ENV_VAR`],
    /// else falls back to defaults. A selected file that does not exist also
    /// yields defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file_or_default(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file_or_default(Path::new(&path)),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Definition lookup timeout.
    pub fn definition_timeout(&self) -> Duration {
        Duration::from_secs(self.definition_timeout_secs)
    }

    /// Timeout for other HTTP requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Overrides the local word list.
    pub fn with_word_list_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.word_list_path = path;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
