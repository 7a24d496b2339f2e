// Internal modules
pub mod config;
pub mod grammar;
pub mod language;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{
    tokenize, tokenize_document, tokenize_named_document, LexicalAnalyzer, LexicalMetrics,
    TokenizedDocument, TokenizedLine,
};
pub use tokens::{LexState, StateId, StateParseError, Token, TokenKind};

// Re-export editor configuration for host integrations
pub use language::{is_folding_end, is_folding_start, LanguageConfiguration};
