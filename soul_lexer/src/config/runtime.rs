// RUNTIME PREFERENCES (User Experience)

use super::error::ConfigError;
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether document tokenization collects per-kind metrics
    pub collect_detailed_metrics: bool,

    /// Whether to emit a debug event for every invalid character
    pub log_invalid_characters: bool,

    /// Upper bound on invalid-character events logged for a single line
    pub max_invalid_logs_per_line: usize,

    /// Whether to warn when a push is dropped at the state depth limit
    pub log_state_overflow: bool,

    /// Whether metrics record how often each keyword occurs
    pub track_keyword_usage: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_invalid_characters: env::var(env_vars::LEXICAL_LOG_INVALID_CHARACTERS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            max_invalid_logs_per_line: env::var(env_vars::LEXICAL_MAX_INVALID_LOGS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            log_state_overflow: env::var(env_vars::LEXICAL_LOG_STATE_OVERFLOW)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_keyword_usage: env::var(env_vars::LEXICAL_TRACK_KEYWORDS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl LexicalPreferences {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_invalid_characters && self.max_invalid_logs_per_line == 0 {
            return Err(ConfigError::InvalidPreference {
                field: "lexical.max_invalid_logs_per_line".to_string(),
                reason: "must be positive when log_invalid_characters is enabled".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the configured sink
    pub min_log_level: LogLevel,

    /// Whether document-level throughput events are logged
    pub log_performance_events: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var(env_vars::LOGGING_LOG_PERFORMANCE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub(crate) fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text. Missing sections fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lexical.validate()
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "SOUL_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_LOG_INVALID_CHARACTERS: &str = "SOUL_LEXICAL_LOG_INVALID_CHARACTERS";
    pub const LEXICAL_MAX_INVALID_LOGS: &str = "SOUL_LEXICAL_MAX_INVALID_LOGS";
    pub const LEXICAL_LOG_STATE_OVERFLOW: &str = "SOUL_LEXICAL_LOG_STATE_OVERFLOW";
    pub const LEXICAL_TRACK_KEYWORDS: &str = "SOUL_LEXICAL_TRACK_KEYWORDS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SOUL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SOUL_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SOUL_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "SOUL_LOGGING_LOG_PERFORMANCE";
}
