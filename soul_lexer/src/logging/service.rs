//! Logging service and sinks

use super::codes::{self, Code, Severity};
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with level filtering
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create a service whose sinks follow the runtime configuration
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        Self::new(Arc::new(create_configured_multi_logger()), min_level)
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_warning_with_code(&self, warning_code: Code, message: &str) {
        self.log_event(LogEvent::warning_with_code(warning_code, message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Human-readable console logger
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", event.format()),
                _ => println!("{}", event.format()),
            }
        }
    }
}

/// JSON-lines logger for editor hosts and tooling
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            // Plain format if the event cannot be serialized
            let line = event.format_json().unwrap_or_else(|_| event.format());
            match event.level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }
    }
}

/// Bounded in-memory logger. Oldest events are dropped once full.
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(config::get_max_memory_events())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    // A panicking test thread must not hide events from the others
    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.filtered(|e| e.is_error())
    }

    pub fn get_warnings(&self) -> Vec<LogEvent> {
        self.filtered(|e| e.is_warning())
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.filtered(|e| e.code == code)
    }

    pub fn has_event_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_info() && e.code == code)
    }

    pub fn get_events_by_category(&self, category: &str) -> Vec<LogEvent> {
        self.filtered(|e| e.category() == category)
    }

    fn filtered<F>(&self, predicate: F) -> Vec<LogEvent>
    where
        F: Fn(&LogEvent) -> bool,
    {
        self.lock()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    pub fn get_summary(&self) -> EventSummary {
        let events = self.lock();

        EventSummary {
            total_count: events.len(),
            error_count: events.iter().filter(|e| e.is_error()).count(),
            warning_count: events.iter().filter(|e| e.is_warning()).count(),
            info_count: events.iter().filter(|e| e.is_info()).count(),
            debug_count: events.iter().filter(|e| e.is_debug()).count(),
            critical_count: events
                .iter()
                .filter(|e| codes::get_severity(e.code.as_str()) == Severity::Critical)
                .count(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();

        if events.len() >= self.capacity {
            let remove_count = events.len() - self.capacity + 1;
            events.drain(0..remove_count);
        }

        events.push(event.clone());
    }
}

/// Summary of events in memory logger
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
    pub critical_count: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    pub fn has_critical_errors(&self) -> bool {
        self.critical_count > 0
    }
}

/// Fans events out to several sinks
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
    min_level: LogLevel,
}

impl MultiLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            loggers: Vec::new(),
            min_level,
        }
    }

    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    pub fn with_console(mut self, console_level: LogLevel) -> Self {
        self.add_logger(Arc::new(ConsoleLogger::new(console_level)));
        self
    }

    pub fn with_structured_console(mut self, console_level: LogLevel) -> Self {
        self.add_logger(Arc::new(StructuredLogger::new(console_level)));
        self
    }

    pub fn with_memory(mut self) -> (Self, Arc<MemoryLogger>) {
        let memory_logger = Arc::new(MemoryLogger::new());
        self.add_logger(memory_logger.clone());
        (self, memory_logger)
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            for logger in &self.loggers {
                logger.log(event);
            }
        }
    }
}

// ============================================================================
// CONFIGURATION-AWARE FACTORY FUNCTIONS
// ============================================================================

/// Sinks selected by the runtime configuration. With console output
/// disabled the result has no sinks and events are discarded.
pub fn create_configured_multi_logger() -> MultiLogger {
    let min_level = config::get_min_log_level();
    let multi_logger = MultiLogger::new(min_level);

    if !config::use_console_logging() {
        return multi_logger;
    }

    if config::use_structured_logging() {
        multi_logger.with_structured_console(min_level)
    } else {
        multi_logger.with_console(min_level)
    }
}

/// Memory-backed logger capturing every level
pub fn create_test_logger() -> Arc<MemoryLogger> {
    Arc::new(MemoryLogger::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_console_and_structured_loggers() {
        let event = LogEvent::warning_with_code(codes::lexical::STATE_DEPTH_EXCEEDED, "Overflow")
            .with_context("depth", "64");

        // Should not panic
        ConsoleLogger::new(LogLevel::Info).log(&event);
        StructuredLogger::new(LogLevel::Debug).log(&event);
    }

    #[test]
    fn test_memory_logger() {
        let logger = MemoryLogger::with_capacity(16);

        logger.log(&LogEvent::info("Message 1"));
        logger.log(&LogEvent::error(codes::system::INTERNAL_ERROR, "Broken table"));
        logger.log(&LogEvent::debug_with_code(
            codes::lexical::INVALID_CHARACTER,
            "Invalid '$'",
        ));

        assert_eq!(logger.event_count(), 3);
        assert_eq!(logger.get_errors().len(), 1);
        assert!(logger.has_event_with_code(codes::lexical::INVALID_CHARACTER));
        assert_eq!(logger.get_events_by_category("Lexical").len(), 1);

        let summary = logger.get_summary();
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.debug_count, 1);
        assert!(summary.has_critical_errors());
        assert!(!summary.has_warnings());

        logger.clear();
        assert_eq!(logger.event_count(), 0);
    }

    #[test]
    fn test_memory_logger_drops_oldest() {
        let logger = MemoryLogger::with_capacity(2);
        logger.log(&LogEvent::info("first"));
        logger.log(&LogEvent::info("second"));
        logger.log(&LogEvent::info("third"));

        let messages: Vec<_> = logger.get_events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[test]
    fn test_multi_logger() {
        let (multi, memory) = MultiLogger::new(LogLevel::Info).with_memory();

        multi.log(&LogEvent::info("kept"));
        multi.log(&LogEvent::debug("filtered"));

        assert_eq!(memory.event_count(), 1);
        assert!(!multi.is_empty());
    }

    #[test]
    fn test_logging_service_filters_by_level() {
        let logger = Arc::new(MemoryLogger::new());
        let mut service = LoggingService::new(logger.clone(), LogLevel::Warning);

        service.log_error(codes::system::INTERNAL_ERROR, "Test error");
        service.log_info("dropped");
        assert_eq!(logger.event_count(), 1);

        service.set_min_level(LogLevel::Debug);
        service.log_debug("kept");
        service.log_success(codes::success::TOKENIZATION_COMPLETE, "done");
        assert_eq!(logger.event_count(), 3);
        assert!(logger.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
    }
}
