//! Error types for configuration, rule tables and form field parsing
//!
//! Directory (network) errors live next to the client in
//! [`directory::DirectoryError`](crate::directory::DirectoryError).

use std::path::PathBuf;

use thiserror::Error;

use crate::form::Field;
use crate::outcome::RuleKind;

/// A field name that is not part of the signup form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

/// Errors raised while loading a [`ValidationConfig`](crate::ValidationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range
    #[error("invalid config value for '{key}': {reason}")]
    Invalid {
        /// Dotted key of the offending value
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// A rules table that can never behave as declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A trigger filter that matches no trigger, so the rule would never run
    #[error("rule {kind} on field '{field}' has a trigger filter that matches no event")]
    EmptyTriggerFilter {
        /// Field the rule was declared on
        field: Field,
        /// Kind of the unreachable rule
        kind: RuleKind,
    },
}
