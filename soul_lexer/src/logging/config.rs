//! Configuration access for logging
//!
//! Buffer limits come from compile-time constants; level and output format
//! come from the runtime configuration.

use super::events::LogLevel;
use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;

fn preferences() -> &'static LoggingPreferences {
    &crate::config::runtime_config().logging
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Minimum level that reaches the configured sink
pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

/// Whether document-level throughput events are emitted
pub fn log_performance_events() -> bool {
    preferences().log_performance_events
}

/// Capacity of the in-memory logger
pub fn get_max_memory_events() -> usize {
    MAX_MEMORY_EVENTS
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate compile-time constants
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_MEMORY_EVENTS > LOG_BUFFER_SIZE {
        return Err("Max memory events exceeds total buffer size".to_string());
    }

    Ok(())
}

/// Configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = preferences();

    format!(
        "Logging Configuration:\n\
         === Limits (Compile-time, {}) ===\n\
         - Log buffer size: {}\n\
         - Max memory events: {}\n\
         - Max message length: {}\n\
         === Preferences (Runtime) ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Performance events: {}",
        crate::config::build_info::profile(),
        LOG_BUFFER_SIZE,
        MAX_MEMORY_EVENTS,
        MAX_LOG_MESSAGE_LENGTH,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.log_performance_events,
    )
}
