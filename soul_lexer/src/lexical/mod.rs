//! Lexical analysis for Soul source text
//!
//! Line-at-a-time tokenization driven by per-state rule tables, plus a
//! document layer that caches line states for incremental re-highlighting.
//!

pub mod analyzer;
pub mod document;
pub mod metrics;
pub(crate) mod rules;

use crate::config::compile_time::document::*;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;

pub use analyzer::{tokenize, LexicalAnalyzer};
pub use document::{
    tokenize_document, tokenize_named_document, LineEnding, TokenizedDocument, TokenizedLine,
};
pub use metrics::LexicalMetrics;

// ============================================================================
// MODULE API
// ============================================================================

/// Create a new lexical analyzer with the process-wide preferences
pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

/// Create analyzer with custom runtime preferences (limits remain compile-time)
pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

const LEXICAL_CODES: [crate::logging::Code; 4] = [
    crate::logging::codes::lexical::INVALID_CHARACTER,
    crate::logging::codes::lexical::STATE_DEPTH_EXCEEDED,
    crate::logging::codes::lexical::ZERO_WIDTH_LIMIT_EXCEEDED,
    crate::logging::codes::lexical::INVALID_STATE_ENCODING,
];

/// Check the lexical codes are registered and force rule compilation
/// (for host startup, so the first keystroke does not pay for it)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    for code in &LEXICAL_CODES {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    rules::tables();

    crate::log_debug!("Lexical limits initialized",
        "max_state_depth" => MAX_STATE_DEPTH,
        "max_zero_width_transitions" => MAX_ZERO_WIDTH_TRANSITIONS,
        "max_line_length" => MAX_LINE_LENGTH,
        "max_document_lines" => MAX_DOCUMENT_LINES
    );

    Ok(())
}

/// Get the compile-time lexer limits (for reporting/debugging)
pub fn get_lexer_limits() -> LexerLimits {
    LexerLimits {
        max_state_depth: MAX_STATE_DEPTH,
        max_zero_width_transitions: MAX_ZERO_WIDTH_TRANSITIONS,
        max_logged_text_length: MAX_LOGGED_TEXT_LENGTH,
        max_line_length: MAX_LINE_LENGTH,
        max_document_lines: MAX_DOCUMENT_LINES,
    }
}

/// Compile-time limits the lexer was built with
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LexerLimits {
    pub max_state_depth: usize,
    pub max_zero_width_transitions: usize,
    pub max_logged_text_length: usize,
    pub max_line_length: usize,
    pub max_document_lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::LexState;

    #[test]
    fn test_create_analyzer_with_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            track_keyword_usage: true,
            ..Default::default()
        };
        let analyzer = create_analyzer_with_preferences(preferences);
        assert!(!analyzer.preferences().collect_detailed_metrics);
        assert!(analyzer.preferences().track_keyword_usage);
    }

    #[test]
    fn test_created_analyzers_agree() {
        let line = "connection osc.out -> out;";
        assert_eq!(
            create_analyzer().tokenize_line(line, &LexState::root()),
            tokenize(line, &LexState::root())
        );
    }

    #[test]
    fn test_init_logging() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_lexer_limits() {
        let limits = get_lexer_limits();
        assert!(limits.max_state_depth >= 4);
        assert!(limits.max_zero_width_transitions >= 3);
        assert!(limits.max_line_length > 0);
    }
}
