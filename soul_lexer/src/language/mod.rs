//! Static editor configuration for Soul
//!
//! Comment delimiters, bracket pairs, auto-closing and surrounding pairs and
//! folding markers, in the shape editor hosts expect when registering a
//! language. Serializes to camelCase JSON.

use crate::logging::codes;
use crate::tokens::TOKEN_POSTFIX;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const LANGUAGE_ID: &str = "soul";

pub const FOLDING_START: &str = r"^\s*#pragma\s+region\b";
pub const FOLDING_END: &str = r"^\s*#pragma\s+endregion\b";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRule {
    pub line_comment: String,
    pub block_comment: (String, String),
}

/// Pair inserted automatically when the opening side is typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoClosingPair {
    pub open: String,
    pub close: String,
    /// Token scopes in which the pair is not auto-closed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_in: Vec<String>,
}

impl AutoClosingPair {
    fn new(open: &str, close: &str, not_in: &[&str]) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            not_in: not_in.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether the pair closes automatically inside a token of `scope`
    pub fn closes_in(&self, scope: &str) -> bool {
        !self.not_in.iter().any(|excluded| excluded == scope)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurroundingPair {
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldingMarkers {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfiguration {
    pub id: String,
    pub token_postfix: String,
    pub comments: CommentRule,
    pub brackets: Vec<(String, String)>,
    pub auto_closing_pairs: Vec<AutoClosingPair>,
    pub surrounding_pairs: Vec<SurroundingPair>,
    pub folding: FoldingMarkers,
}

impl LanguageConfiguration {
    pub fn soul() -> Self {
        let pair = |open: &str, close: &str| (open.to_string(), close.to_string());
        let surround = |open: &str, close: &str| SurroundingPair {
            open: open.to_string(),
            close: close.to_string(),
        };

        Self {
            id: LANGUAGE_ID.to_string(),
            token_postfix: TOKEN_POSTFIX.to_string(),
            comments: CommentRule {
                line_comment: "//".to_string(),
                block_comment: pair("/*", "*/"),
            },
            brackets: vec![pair("{", "}"), pair("[", "]"), pair("(", ")")],
            auto_closing_pairs: vec![
                AutoClosingPair::new("[", "]", &[]),
                AutoClosingPair::new("{", "}", &[]),
                AutoClosingPair::new("(", ")", &[]),
                AutoClosingPair::new("'", "'", &["string", "comment"]),
                AutoClosingPair::new("\"", "\"", &["string"]),
            ],
            surrounding_pairs: vec![
                surround("{", "}"),
                surround("[", "]"),
                surround("(", ")"),
                surround("\"", "\""),
                surround("'", "'"),
            ],
            folding: FoldingMarkers {
                start: FOLDING_START.to_string(),
                end: FOLDING_END.to_string(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn auto_closing_pair(&self, open: &str) -> Option<&AutoClosingPair> {
        self.auto_closing_pairs.iter().find(|p| p.open == open)
    }
}

impl Default for LanguageConfiguration {
    fn default() -> Self {
        Self::soul()
    }
}

// ============================================================================
// FOLDING MARKERS
// ============================================================================

static FOLDING_START_RE: OnceLock<Option<Regex>> = OnceLock::new();
static FOLDING_END_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn marker(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            crate::logging::safe_log_error(
                codes::system::INTERNAL_ERROR,
                &format!("Folding marker {:?} failed to compile: {}", source, e),
            );
            None
        }
    })
    .as_ref()
}

/// `#pragma region` line. Works on raw text, independent of lexer state.
pub fn is_folding_start(line: &str) -> bool {
    marker(&FOLDING_START_RE, FOLDING_START).is_some_and(|re| re.is_match(line))
}

/// `#pragma endregion` line
pub fn is_folding_end(line: &str) -> bool {
    marker(&FOLDING_END_RE, FOLDING_END).is_some_and(|re| re.is_match(line))
}
