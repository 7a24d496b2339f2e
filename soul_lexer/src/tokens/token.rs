//! Classified line tokens
//!
//! A token is a byte range of one line plus its classification. Scope names
//! follow the editor theme convention: a dotted classification with the
//! language postfix appended, e.g. `keyword.if.soul`.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Postfix appended to every non-empty scope name
pub const TOKEN_POSTFIX: &str = ".soul";

/// Bracket families recognised by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketFamily {
    Curly,
    Square,
    Parenthesis,
}

impl BracketFamily {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Curly => "curly",
            Self::Square => "square",
            Self::Parenthesis => "parenthesis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketSide {
    Open,
    Close,
}

/// A bracket character split into family and side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bracket {
    pub family: BracketFamily,
    pub side: BracketSide,
}

impl Bracket {
    pub fn from_char(ch: char) -> Option<Self> {
        let (family, side) = match ch {
            '{' => (BracketFamily::Curly, BracketSide::Open),
            '}' => (BracketFamily::Curly, BracketSide::Close),
            '[' => (BracketFamily::Square, BracketSide::Open),
            ']' => (BracketFamily::Square, BracketSide::Close),
            '(' => (BracketFamily::Parenthesis, BracketSide::Open),
            ')' => (BracketFamily::Parenthesis, BracketSide::Close),
            _ => return None,
        };
        Some(Self { family, side })
    }

    pub fn is_open(&self) -> bool {
        self.side == BracketSide::Open
    }
}

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    /// The connection arrow `->`
    Operator,
    Delimiter,
    /// Delimiter with a bracket sub-kind
    Bracket(Bracket),
    String,
    StringEscape,
    StringQuote,
    Number,
    NumberFloat,
    NumberHex,
    Comment,
    /// `#r` / `#load` script directive
    Directive,
    /// Any other `#word` line
    NamespaceDirective,
    Whitespace,
    /// Consumed but uncoloured: unknown symbol runs, bare `wrap`/`clamp`
    Plain,
    Invalid,
}

impl TokenKind {
    /// Classification name without word suffix or language postfix.
    /// Whitespace and plain tokens have an empty scope.
    pub const fn base_scope(&self) -> &'static str {
        match self {
            Self::Keyword | Self::Operator => "keyword",
            Self::Identifier => "identifier",
            Self::Delimiter => "delimiter",
            Self::Bracket(Bracket {
                family: BracketFamily::Curly,
                ..
            }) => "delimiter.curly",
            Self::Bracket(Bracket {
                family: BracketFamily::Square,
                ..
            }) => "delimiter.square",
            Self::Bracket(Bracket {
                family: BracketFamily::Parenthesis,
                ..
            }) => "delimiter.parenthesis",
            Self::String => "string",
            Self::StringEscape => "string.escape",
            Self::StringQuote => "string.quote",
            Self::Number => "number",
            Self::NumberFloat => "number.float",
            Self::NumberHex => "number.hex",
            Self::Comment => "comment",
            Self::Directive => "directive.csx",
            Self::NamespaceDirective => "namespace.cpp",
            Self::Whitespace | Self::Plain => "",
            Self::Invalid => "invalid",
        }
    }

    /// Stable name used for metrics and debugging
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Operator => "operator",
            Self::Delimiter => "delimiter",
            Self::Bracket(_) => "bracket",
            Self::String => "string",
            Self::StringEscape => "string.escape",
            Self::StringQuote => "string.quote",
            Self::Number => "number",
            Self::NumberFloat => "number.float",
            Self::NumberHex => "number.hex",
            Self::Comment => "comment",
            Self::Directive => "directive",
            Self::NamespaceDirective => "namespace-directive",
            Self::Whitespace => "whitespace",
            Self::Plain => "plain",
            Self::Invalid => "invalid",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number | Self::NumberFloat | Self::NumberHex)
    }

    pub fn is_string_part(&self) -> bool {
        matches!(self, Self::String | Self::StringEscape | Self::StringQuote)
    }

    /// Tokens a highlighter leaves uncoloured
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Plain)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One classified span of a line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the token within its line
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, offset: usize) -> Self {
        Self {
            kind,
            text: text.to_string(),
            offset,
        }
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset one past the token's last byte
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Full theme scope, e.g. `keyword.processor.soul` or `delimiter.curly.soul`.
    /// Whitespace and plain tokens yield an empty string.
    pub fn scope_name(&self) -> String {
        match self.kind {
            TokenKind::Keyword | TokenKind::Operator => {
                format!("keyword.{}{}", self.text, TOKEN_POSTFIX)
            }
            kind if kind.is_trivia() => String::new(),
            kind => format!("{}{}", kind.base_scope(), TOKEN_POSTFIX),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}", self.kind, self.text, self.offset)
    }
}
