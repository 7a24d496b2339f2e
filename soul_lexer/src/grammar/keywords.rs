//! Soul word and operator tables
//!
//! Keywords are matched against the whole word only, so `forever` and `iffy`
//! stay identifiers. Operators are matched against a whole symbol run.

/// Reserved keywords of the Soul language
pub fn reserved_keywords() -> &'static [&'static str] {
    &[
        // Control flow
        "if",
        "else",
        "do",
        "while",
        "for",
        "loop",
        "break",
        "continue",
        "return",
        // Declarations
        "const",
        "let",
        "var",
        // Types
        "void",
        "int",
        "int32",
        "int64",
        "float",
        "float32",
        "float64",
        "fixed",
        "bool",
        "true",
        "false",
        "string",
        "struct",
        "using",
        "external",
        // Program structure
        "graph",
        "processor",
        "namespace",
        "connection",
        "event",
        "import",
        // Exceptions
        "try",
        "catch",
        "throw",
    ]
}

/// Keywords that open an endpoint declaration
pub fn endpoint_keywords() -> &'static [&'static str] {
    &["input", "output"]
}

/// Keywords only coloured when a `<` argument list follows
pub fn wrap_clamp_keywords() -> &'static [&'static str] {
    &["wrap", "clamp"]
}

/// Endpoint kind words, keywords only inside an endpoint declaration
pub fn endpoint_kind_words() -> &'static [&'static str] {
    &["event", "stream"]
}

/// Operators recognised when a whole symbol run matches one of them
pub fn operators() -> &'static [&'static str] {
    &[
        "!", "=", "??", "||", "&&", "|", "^", "&", "==", "!=", "<=", ">=", "<<", "+", "-", "*",
        "/", "%", "~", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
        ">>", "=>", "::",
    ]
}

/// Check if a word is a reserved keyword
pub fn is_reserved_keyword(word: &str) -> bool {
    reserved_keywords().contains(&word)
}

pub fn is_endpoint_keyword(word: &str) -> bool {
    endpoint_keywords().contains(&word)
}

pub fn is_wrap_clamp_keyword(word: &str) -> bool {
    wrap_clamp_keywords().contains(&word)
}

/// Check if a whole symbol run is a known operator
pub fn is_operator(symbols: &str) -> bool {
    operators().contains(&symbols)
}

/// Classification of a word scanned at the top level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// `wrap` / `clamp`: needs a look at what follows
    WrapClamp,
    /// `input` / `output`: opens an endpoint declaration
    Endpoint,
    /// Any other reserved keyword
    Keyword,
    /// Plain identifier
    Identifier,
}

/// Unified classification, wrap/clamp and endpoint words first
pub fn classify_word(word: &str) -> WordClass {
    if is_wrap_clamp_keyword(word) {
        WordClass::WrapClamp
    } else if is_endpoint_keyword(word) {
        WordClass::Endpoint
    } else if is_reserved_keyword(word) {
        WordClass::Keyword
    } else {
        WordClass::Identifier
    }
}
