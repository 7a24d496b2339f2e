//! Line scanner
//!
//! Drives the rule tables over one line. Each step either consumes input and
//! emits a token, or performs a zero-width push/pop. Consecutive zero-width
//! steps are capped; past the cap one character is emitted as invalid so the
//! scan always moves forward.

use super::rules::{self, Step, Transition};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{LexState, StateId, Token, TokenKind};
use crate::{log_debug, log_warning};

/// Tokenize one line starting from `start`.
///
/// `line` must not contain a line break. The returned tokens cover the line
/// exactly and the returned state resumes scanning on the next line. Uses the
/// process-wide lexical preferences, which only affect logging.
pub fn tokenize(line: &str, start: &LexState) -> (Vec<Token>, LexState) {
    scan_line(line, start, &crate::config::runtime_config().lexical)
}

/// Line scanner bound to explicit preferences
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    preferences: LexicalPreferences,
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(crate::config::runtime_config().lexical.clone())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn tokenize_line(&self, line: &str, start: &LexState) -> (Vec<Token>, LexState) {
        scan_line(line, start, &self.preferences)
    }
}

fn scan_line(
    line: &str,
    start: &LexState,
    preferences: &LexicalPreferences,
) -> (Vec<Token>, LexState) {
    let tables = rules::tables();
    let mut state = start.clone();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut zero_width_steps = 0;
    let mut invalid_logged = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        let found = if zero_width_steps < MAX_ZERO_WIDTH_TRANSITIONS {
            tables.find(state.current(), rest, pos == 0)
        } else {
            log_warning!(code = codes::lexical::ZERO_WIDTH_LIMIT_EXCEEDED,
                "Zero-width transition limit reached",
                "state" => &state,
                "offset" => pos,
                "limit" => MAX_ZERO_WIDTH_TRANSITIONS
            );
            None
        };

        match found {
            Some((_, Step::Rematch(next))) => {
                zero_width_steps += 1;
                push_state(&mut state, next, pos, preferences);
            }
            Some((_, Step::PopZeroWidth)) => {
                zero_width_steps += 1;
                state.pop();
            }
            Some((len, Step::Emit(kind, transition))) => {
                tokens.push(Token::new(kind, &rest[..len], pos));
                pos += len;
                zero_width_steps = 0;
                match transition {
                    Transition::Stay => {}
                    Transition::Push(next) => push_state(&mut state, next, pos, preferences),
                    Transition::Pop => state.pop(),
                }
            }
            None => {
                let len = rest.chars().next().map_or(1, char::len_utf8);
                let text = &rest[..len];

                if preferences.log_invalid_characters
                    && invalid_logged < preferences.max_invalid_logs_per_line
                {
                    invalid_logged += 1;
                    log_debug!(code = codes::lexical::INVALID_CHARACTER,
                        "Character matched no rule",
                        "char" => text.escape_debug(),
                        "offset" => pos,
                        "state" => &state,
                        "line" => excerpt(line)
                    );
                }

                tokens.push(Token::new(TokenKind::Invalid, text, pos));
                pos += len;
                zero_width_steps = 0;
            }
        }
    }

    (tokens, state)
}

fn push_state(state: &mut LexState, next: StateId, offset: usize, preferences: &LexicalPreferences) {
    if !state.push(next) && preferences.log_state_overflow {
        log_warning!(code = codes::lexical::STATE_DEPTH_EXCEEDED,
            "State push ignored at depth limit",
            "pushed" => next,
            "state" => &*state,
            "offset" => offset,
            "limit" => MAX_STATE_DEPTH
        );
    }
}

/// Line text shortened for log context
fn excerpt(line: &str) -> &str {
    if line.len() <= MAX_LOGGED_TEXT_LENGTH {
        return line;
    }
    let mut cut = MAX_LOGGED_TEXT_LENGTH;
    while !line.is_char_boundary(cut) {
        cut -= 1;
    }
    &line[..cut]
}
