//! Configuration for the to-do binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::{Filter, ParseFilterError};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use todomind_runtime::StoreConfig;

/// Log filter used when neither `RUST_LOG` nor `TODO_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "todo=info,todomind_runtime=warn";

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A filter variable named an unknown filter
    #[error("invalid {var}: {source}")]
    InvalidFilter {
        /// Variable name
        var: &'static str,
        /// Parse failure
        #[source]
        source: ParseFilterError,
    },

    /// A numeric variable was not a positive integer
    #[error("invalid {var}: expected a positive integer, got '{value}'")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter directive (`TODO_LOG`)
    pub log_filter: String,
    /// Filter selected when the widget opens (`TODO_INITIAL_FILTER`)
    pub initial_filter: Filter,
    /// Feedback actions allowed per user event (`TODO_MAX_FEEDBACK`)
    pub max_feedback_actions: usize,
    /// Prompt printed before each input line (`TODO_PROMPT`)
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            initial_filter: Filter::All,
            max_feedback_actions: StoreConfig::default().max_feedback_actions,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let initial_filter = match lookup("TODO_INITIAL_FILTER") {
            Some(raw) => raw
                .parse::<Filter>()
                .map_err(|source| ConfigError::InvalidFilter {
                    var: "TODO_INITIAL_FILTER",
                    source,
                })?,
            None => defaults.initial_filter,
        };

        let max_feedback_actions = match lookup("TODO_MAX_FEEDBACK") {
            Some(raw) => {
                let parsed = raw.trim().parse::<usize>().ok().filter(|value| *value > 0);
                parsed.ok_or(ConfigError::InvalidNumber {
                    var: "TODO_MAX_FEEDBACK",
                    value: raw,
                })?
            },
            None => defaults.max_feedback_actions,
        };

        Ok(Self {
            log_filter: lookup("TODO_LOG").unwrap_or(defaults.log_filter),
            initial_filter,
            max_feedback_actions,
            prompt: lookup("TODO_PROMPT").unwrap_or(defaults.prompt),
        })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_feedback_actions)
    }
}
