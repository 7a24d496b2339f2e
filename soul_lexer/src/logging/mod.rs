//! Global logging module for the Soul lexer
//!
//! Provides thread-safe global logging with per-thread document context and
//! a macro interface. Tokenization never depends on logging: with no global
//! service installed every event is dropped.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, EventSummary, Logger, LoggingService, MemoryLogger, MultiLogger,
    StructuredLogger,
};

use crate::utils::Span;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoggingError {
    #[error("Global logger already initialized")]
    AlreadyInitialized,

    #[error("Logging configuration invalid: {0}")]
    InvalidConfiguration(String),
}

impl LoggingError {
    pub fn error_code(&self) -> Code {
        codes::system::INITIALIZATION_FAILURE
    }
}

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static DOCUMENT_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the runtime configuration
pub fn init_global_logging() -> Result<(), LoggingError> {
    config::validate_config().map_err(LoggingError::InvalidConfiguration)?;

    let logging_service = Arc::new(LoggingService::with_config());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    logging_service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        )
        .with_context("profile", crate::config::build_info::profile()),
    );

    Ok(())
}

/// Initialize with custom service (primarily for testing and embedding hosts)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), LoggingError> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| LoggingError::AlreadyInitialized)
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether an event at `level` would reach a sink
pub fn is_enabled(level: LogLevel) -> bool {
    try_get_global_logger().is_some_and(|logger| logger.should_log(level))
}

// ============================================================================
// DOCUMENT CONTEXT MANAGEMENT
// ============================================================================

pub fn set_document_context(name: &str) {
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(name.to_string());
    });
}

pub fn clear_document_context() {
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with events on this thread tagged by document name.
/// The previous context is restored afterwards.
pub fn with_document_context<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_document_context();
    set_document_context(name);
    let result = f();
    DOCUMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

pub fn get_current_document_context() -> Option<String> {
    DOCUMENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Build and emit an event (used by the logging macros)
pub fn log_with_context(
    level: LogLevel,
    code: Option<Code>,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, &str)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(level) {
        return;
    }

    let mut event = match (level, code) {
        (LogLevel::Error, Some(code)) => LogEvent::error(code, message),
        (LogLevel::Error, None) => LogEvent::error(codes::system::INTERNAL_ERROR, message),
        (LogLevel::Warning, Some(code)) => LogEvent::warning_with_code(code, message),
        (LogLevel::Warning, None) => LogEvent::warning(message),
        (LogLevel::Info, Some(code)) => LogEvent::success(code, message),
        (LogLevel::Info, None) => LogEvent::info(message),
        (LogLevel::Debug, Some(code)) => LogEvent::debug_with_code(code, message),
        (LogLevel::Debug, None) => LogEvent::debug(message),
    };

    if let Some(s) = span {
        event = event.with_span(s);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(document) = get_current_document_context() {
        event = event.with_document(&document);
    }

    logger.log_event(event);
}

/// Diagnostics string for hosts
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    if let Some(logger) = try_get_global_logger() {
        diagnostics.push_str(&format!("Active level: {:?}\n", logger.min_level()));
    }
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Error logging that still reports when no global logger is installed
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
