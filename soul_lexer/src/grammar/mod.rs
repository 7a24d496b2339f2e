//! Static language tables for Soul

pub mod keywords;

pub use keywords::{classify_word, is_operator, is_reserved_keyword, WordClass};
