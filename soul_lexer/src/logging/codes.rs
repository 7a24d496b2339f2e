//! Diagnostic codes for the Soul lexer
//!
//! Every code the crate logs is declared here together with its registry
//! metadata. Codes prefixed `E`/`ERR` are failures, `I` codes are successes.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Registered diagnostic code, e.g. `E020`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_success(&self) -> bool {
        self.0.starts_with('I')
    }

    /// Registry entry, if the code is registered
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        get_error_metadata(self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// How badly a failure affects the host; successes are `Low`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry entry for one code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const INVALID_CONFIG_FORMAT: Code = Code::new("E010");
    pub const CONFIG_IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PREFERENCE: Code = Code::new("E012");
}

/// Lexical codes. None of these stop tokenization.
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const STATE_DEPTH_EXCEEDED: Code = Code::new("E021");
    pub const ZERO_WIDTH_LIMIT_EXCEEDED: Code = Code::new("E022");
    pub const INVALID_STATE_ENCODING: Code = Code::new("E023");
}

/// Document codes
pub mod document {
    use super::Code;

    pub const LINE_TOO_LONG: Code = Code::new("E030");
    pub const TOO_MANY_LINES: Code = Code::new("E031");
    pub const LINE_INDEX_OUT_OF_RANGE: Code = Code::new("E032");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const RETOKENIZATION_COMPLETE: Code = Code::new("I021");
    pub const CONFIGURATION_LOADED: Code = Code::new("I030");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                "Internal lexer invariant violated",
                "File a bug report with the offending source line",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                "System initialization failure",
                "Check logging configuration and initialise only once",
            ),
            // Configuration
            ErrorMetadata::new(
                "E010",
                "Configuration",
                Severity::Medium,
                false,
                "Configuration text is not valid TOML for the expected schema",
                "Fix the TOML syntax or the field types",
            ),
            ErrorMetadata::new(
                "E011",
                "Configuration",
                Severity::Medium,
                false,
                "Configuration file could not be read",
                "Check the file path and permissions",
            ),
            ErrorMetadata::new(
                "E012",
                "Configuration",
                Severity::Low,
                false,
                "Preference value is outside its allowed range",
                "Adjust the preference value",
            ),
            // Lexical
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Low,
                true,
                "Character matched no rule and was classified invalid",
                "None required; scanning continues with the next character",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Medium,
                true,
                "State stack reached its depth limit; push ignored",
                "Check for runaway nesting such as unbalanced endpoint braces",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::High,
                true,
                "Too many zero-width transitions without consuming input",
                "File a bug report; a rule table lost forward progress",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::Low,
                false,
                "Encoded lexer state could not be decoded",
                "Discard the cached state and re-tokenize from the document start",
            ),
            // Document
            ErrorMetadata::new(
                "E030",
                "Document",
                Severity::Low,
                true,
                "Line is longer than the configured soft limit",
                "None required; the line is still tokenized",
            ),
            ErrorMetadata::new(
                "E031",
                "Document",
                Severity::Low,
                true,
                "Document has more lines than the configured soft limit",
                "None required; the document is still tokenized",
            ),
            ErrorMetadata::new(
                "E032",
                "Document",
                Severity::Low,
                true,
                "Edit started past the end of the document; clamped",
                "Check the line index passed by the host",
            ),
        ];

        entries.into_iter().map(|meta| (meta.code, meta)).collect()
    })
}

/// Look up metadata for a code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity for a code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|meta| meta.severity)
        .unwrap_or(Severity::Low)
}

/// Check if a code describes a recoverable condition
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|meta| meta.recoverable)
        .unwrap_or(true)
}

/// Get description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|meta| meta.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|meta| meta.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    if let Some(meta) = get_error_metadata(code) {
        return meta.category;
    }
    match code.chars().next() {
        Some('I') => "Success",
        Some('W') => "Warning",
        Some('D') => "Debug",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_error_constants() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            config::INVALID_CONFIG_FORMAT,
            config::CONFIG_IO_ERROR,
            config::INVALID_PREFERENCE,
            lexical::INVALID_CHARACTER,
            lexical::STATE_DEPTH_EXCEEDED,
            lexical::ZERO_WIDTH_LIMIT_EXCEEDED,
            lexical::INVALID_STATE_ENCODING,
            document::LINE_TOO_LONG,
            document::TOO_MANY_LINES,
            document::LINE_INDEX_OUT_OF_RANGE,
        ];

        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_invalid_character_is_recoverable() {
        let code = lexical::INVALID_CHARACTER.as_str();
        assert!(is_recoverable(code));
        assert_eq!(get_category(code), "Lexical");
        assert_eq!(get_severity(code), Severity::Low);
    }

    #[test]
    fn test_code_helpers() {
        assert!(success::TOKENIZATION_COMPLETE.is_success());
        assert!(!lexical::STATE_DEPTH_EXCEEDED.is_success());
        assert_eq!(
            lexical::STATE_DEPTH_EXCEEDED.metadata().map(|m| m.severity),
            Some(Severity::Medium)
        );
        assert_eq!(serde_json::to_string(&document::LINE_TOO_LONG).unwrap(), "\"E030\"");
        assert!(Severity::Critical < Severity::Low);
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("I020"), "Success");
        assert_eq!(get_category("D000"), "Debug");
    }
}
