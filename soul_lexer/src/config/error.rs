//! Configuration errors

use crate::logging::codes;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration TOML: {message}")]
    Parse { message: String },

    #[error("Failed to serialize configuration: {message}")]
    Serialize { message: String },

    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid preference '{field}': {reason}")]
    InvalidPreference { field: String, reason: String },

    #[error("Runtime configuration already initialized")]
    AlreadyInitialized,
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::Parse { .. } => codes::config::INVALID_CONFIG_FORMAT,
            ConfigError::Serialize { .. } => codes::config::INVALID_CONFIG_FORMAT,
            ConfigError::Io { .. } => codes::config::CONFIG_IO_ERROR,
            ConfigError::InvalidPreference { .. } => codes::config::INVALID_PREFERENCE,
            ConfigError::AlreadyInitialized => codes::system::INITIALIZATION_FAILURE,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::Parse {
            message: error.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(error: toml::ser::Error) -> Self {
        ConfigError::Serialize {
            message: error.to_string(),
        }
    }
}
