//! Token and state types for Soul lexical analysis
//!
//! - **[`Token`]**: a classified byte range of one line
//! - **[`TokenKind`]**: classification, including bracket sub-kinds
//! - **[`LexState`]**: the resumable stack of rule tables threaded from one
//!   line to the next
//!
//! Tokens of a line are ordered, contiguous and gap-free, so concatenating
//! their texts reconstructs the line.

pub mod state;
pub mod token;

pub use state::{LexState, StateId, StateParseError};
pub use token::{Bracket, BracketFamily, BracketSide, Token, TokenKind, TOKEN_POSTFIX};
