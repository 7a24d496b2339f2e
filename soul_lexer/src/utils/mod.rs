//! Shared location types used by document tokenization and logging.

pub mod span;

pub use span::{Position, Span, Spanned};
