//! Configuration module for the Soul lexer
//! Compile-time limits are generated from TOML by build.rs

// Generated from config/<profile>.toml at the workspace root
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod error;
pub mod runtime;

pub use error::ConfigError;
pub use runtime::{LexicalPreferences, LoggingPreferences, RuntimeConfig};

use std::sync::OnceLock;

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Install the process-wide runtime configuration.
///
/// Must run before the first tokenization or logging call; afterwards the
/// environment-derived defaults are already fixed in place.
pub fn init_runtime_config(config: RuntimeConfig) -> Result<(), ConfigError> {
    config.validate()?;
    RUNTIME_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Active runtime configuration, falling back to environment defaults
pub fn runtime_config() -> &'static RuntimeConfig {
    RUNTIME_CONFIG.get_or_init(RuntimeConfig::default)
}

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SOUL_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SOUL_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(compile_time::lexical::MAX_STATE_DEPTH >= 4);
        assert!(compile_time::lexical::MAX_ZERO_WIDTH_TRANSITIONS >= 3);
        assert!(compile_time::logging::MAX_MEMORY_EVENTS <= compile_time::logging::LOG_BUFFER_SIZE);
    }

    #[test]
    fn test_runtime_config_is_stable() {
        let first = super::runtime_config() as *const _;
        let second = super::runtime_config() as *const _;
        assert_eq!(first, second);
        assert!(super::init_runtime_config(super::RuntimeConfig::default()).is_err());
    }

    #[test]
    fn test_source_info_mentions_profile() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
