//! Configuration for the validation engine and the user directory client
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! ```toml
//! password_min_length = 4
//!
//! [directory]
//! base_url = "https://api.github.com/users/"
//! timeout_seconds = 10
//! user_agent = "signup-validation"
//! ```
//!
//! ```
//! use signup_validation::ValidationConfig;
//!
//! let config = ValidationConfig::from_toml_str("password_min_length = 8").unwrap();
//! assert_eq!(config.password_min_length, 8);
//! assert_eq!(config.directory.base_url, "https://api.github.com/users/");
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum password length (default: 4).
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    /// Remote user directory settings.
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Settings for the remote user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL the username is appended to (default: GitHub's users endpoint).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// `User-Agent` header sent with every lookup.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_password_min_length() -> usize {
    4
}

fn default_base_url() -> String {
    "https://api.github.com/users/".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl DirectoryConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ValidationConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ValidationConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "directory.timeout_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.directory.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "directory.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
