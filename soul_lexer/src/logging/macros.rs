//! Type-safe logging macros using Code types with Display support
//!
//! Every macro checks the global service's level before formatting any
//! context, so disabled levels cost a single branch inside the tokenizer.

// ============================================================================
// ERROR LOGGING MACROS
// ============================================================================

/// Log error with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogLevel::Error, Some($code), $message, None, vec![]
        )
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogLevel::Error, Some($code), $message, Some($span), vec![]
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::is_enabled($crate::logging::LogLevel::Error) {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context(
                $crate::logging::LogLevel::Error, Some($code), $message, None, context_refs
            )
        }
    };
}

// ============================================================================
// SUCCESS LOGGING MACROS
// ============================================================================

/// Log success with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogLevel::Info, Some($code), $message, None, vec![]
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::is_enabled($crate::logging::LogLevel::Info) {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context(
                $crate::logging::LogLevel::Info, Some($code), $message, None, context_refs
            )
        }
    };
}

// ============================================================================
// INFO LOGGING MACROS
// ============================================================================

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogLevel::Info, None, $message, None, vec![]
        )
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::is_enabled($crate::logging::LogLevel::Info) {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context(
                $crate::logging::LogLevel::Info, None, $message, None, context_refs
            )
        }
    };
}

// ============================================================================
// WARNING LOGGING MACROS
// ============================================================================

/// Log warning, optionally with a registered code
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogLevel::Warning, Some($code), $message, None, vec![]
        )
    };

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::is_enabled($crate::logging::LogLevel::Warning) {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context(
                $crate::logging::LogLevel::Warning, Some($code), $message, None, context_refs
            )
        }
    };

    ($message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogLevel::Warning, None, $message, None, vec![]
        )
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::is_enabled($crate::logging::LogLevel::Warning) {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context(
                $crate::logging::LogLevel::Warning, None, $message, None, context_refs
            )
        }
    };
}

// ============================================================================
// DEBUG LOGGING MACROS
// ============================================================================

/// Log debug message, optionally with a registered code
#[macro_export]
macro_rules! log_debug {
    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::is_enabled($crate::logging::LogLevel::Debug) {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context(
                $crate::logging::LogLevel::Debug, Some($code), $message, None, context_refs
            )
        }
    };

    ($message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogLevel::Debug, None, $message, None, vec![]
        )
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::is_enabled($crate::logging::LogLevel::Debug) {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context(
                $crate::logging::LogLevel::Debug, None, $message, None, context_refs
            )
        }
    };
}

// ============================================================================
// CONVENIENCE MACROS FOR COMMON PATTERNS
// ============================================================================

/// Log throughput with standard format, gated on `log_performance_events`
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::config::log_performance_events() {
            $crate::log_success!($code, $message,
                "duration_ms" => $duration.as_secs_f64() * 1000.0,
                $($key => $value),+
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    #[test]
    fn test_macros_accept_display_values() {
        // No global logger is required; events are simply dropped
        let duration = std::time::Duration::from_millis(3);
        let lines: usize = 42;

        log_error!(codes::system::INTERNAL_ERROR, "Rule table broken", "state" => "root");
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenized", "lines" => lines);
        log_info!("Document opened", "lines" => lines, "large" => lines > 1000);
        log_warning!(code = codes::document::LINE_TOO_LONG, "Long line", "line" => 7);
        log_warning!("Plain warning");
        log_debug!(code = codes::lexical::INVALID_CHARACTER, "Invalid", "char" => '$');
        log_debug!("Plain debug", "offset" => 3);
        log_performance!(codes::success::TOKENIZATION_COMPLETE, "Timed",
            duration = duration,
            "lines" => lines
        );
    }
}
