//! Per-state rule tables
//!
//! Each state owns an ordered list of (pattern, action) rules; the first rule
//! whose pattern matches at the cursor wins. Patterns are anchored with `\A`
//! and run against the unconsumed remainder of the line.

use crate::grammar::keywords::{
    classify_word, endpoint_kind_words, is_operator, is_reserved_keyword, WordClass,
};
use crate::logging::codes;
use crate::tokens::{Bracket, StateId, TokenKind};
use regex::Regex;
use std::sync::OnceLock;

// ============================================================================
// PATTERN SOURCES
// ============================================================================

const IDENTIFIER: &str = r"\A[A-Za-z_][A-Za-z0-9_]*";
const ROOT_WORD: &str = r"\A@?[A-Za-z_][A-Za-z0-9_]*";
const BRACKETS: &str = r"\A[{}()\[\]]";
const SYMBOLS: &str = r"\A[!.:=><~&|+\-*/%@#]+";
const ESCAPES: &str = r#"\A\\(?:[abfnrtv\\"']|x[0-9A-Fa-f]{1,4}|u[0-9A-Fa-f]{4}|U[0-9A-Fa-f]{8})"#;
const INTEGER: &str = r"\A[0-9_]+[lL]?";

// ============================================================================
// RULE MODEL
// ============================================================================

/// State change applied after a consuming match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Stay,
    Push(StateId),
    Pop,
}

/// Keyword-style dispatch on the matched text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cases {
    /// Top-level word: wrap/clamp, endpoint, keyword or identifier
    RootWord,
    /// Keyword if reserved, identifier otherwise
    Word,
    /// Delimiter if the whole run is an operator, plain otherwise
    Symbols,
    /// Bracket family and side from the character
    Bracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Emit(TokenKind, Transition),
    /// Push a state without consuming input
    Rematch(StateId),
    /// Pop without consuming input
    PopZeroWidth,
    Cases(Cases),
}

/// An action with any case dispatch resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Emit(TokenKind, Transition),
    Rematch(StateId),
    PopZeroWidth,
}

impl Cases {
    fn resolve(self, text: &str) -> Step {
        match self {
            Cases::RootWord => match classify_word(text) {
                WordClass::WrapClamp => Step::Rematch(StateId::PossibleWrapClamp),
                WordClass::Endpoint => Step::Emit(
                    TokenKind::Keyword,
                    Transition::Push(StateId::EndpointDefinition),
                ),
                WordClass::Keyword => {
                    Step::Emit(TokenKind::Keyword, Transition::Push(StateId::Qualified))
                }
                WordClass::Identifier => {
                    Step::Emit(TokenKind::Identifier, Transition::Push(StateId::Qualified))
                }
            },
            Cases::Word if is_reserved_keyword(text) => {
                Step::Emit(TokenKind::Keyword, Transition::Stay)
            }
            Cases::Word => Step::Emit(TokenKind::Identifier, Transition::Stay),
            Cases::Symbols if is_operator(text) => {
                Step::Emit(TokenKind::Delimiter, Transition::Stay)
            }
            Cases::Symbols => Step::Emit(TokenKind::Plain, Transition::Stay),
            Cases::Bracket => {
                let kind = text
                    .chars()
                    .next()
                    .and_then(Bracket::from_char)
                    .map(TokenKind::Bracket)
                    .unwrap_or(TokenKind::Delimiter);
                Step::Emit(kind, Transition::Stay)
            }
        }
    }
}

impl Action {
    fn resolve(self, text: &str) -> Step {
        match self {
            Action::Emit(kind, transition) => Step::Emit(kind, transition),
            Action::Rematch(state) => Step::Rematch(state),
            Action::PopZeroWidth => Step::PopZeroWidth,
            Action::Cases(cases) => cases.resolve(text),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Pattern {
    Regex(Regex),
    /// Matches the empty string anywhere
    Always,
    /// Source failed to compile; never matches
    Never,
}

#[derive(Debug)]
pub(crate) struct Rule {
    pub(crate) pattern: Pattern,
    /// Only tried at the first byte of the line
    pub(crate) line_start: bool,
    pub(crate) action: Action,
}

impl Rule {
    fn new(source: &str, action: Action) -> Self {
        Self {
            pattern: compile(source),
            line_start: false,
            action,
        }
    }

    fn at_line_start(source: &str, action: Action) -> Self {
        Self {
            line_start: true,
            ..Self::new(source, action)
        }
    }

    fn fallback(action: Action) -> Self {
        Self {
            pattern: Pattern::Always,
            line_start: false,
            action,
        }
    }

    /// Length of the match at the start of `rest`
    fn match_len(&self, rest: &str) -> Option<usize> {
        match &self.pattern {
            Pattern::Regex(regex) => regex.find(rest).map(|m| m.end()),
            Pattern::Always => Some(0),
            Pattern::Never => None,
        }
    }
}

fn compile(source: &str) -> Pattern {
    match Regex::new(source) {
        Ok(regex) => Pattern::Regex(regex),
        Err(e) => {
            crate::logging::safe_log_error(
                codes::system::INTERNAL_ERROR,
                &format!("Rule pattern {:?} failed to compile: {}", source, e),
            );
            Pattern::Never
        }
    }
}

fn emit(kind: TokenKind) -> Action {
    Action::Emit(kind, Transition::Stay)
}

// ============================================================================
// RULE TABLES
// ============================================================================

pub(crate) struct RuleTables {
    whitespace: Vec<Rule>,
    root: Vec<Rule>,
    endpoint_definition: Vec<Rule>,
    possible_wrap_clamp: Vec<Rule>,
    wrap_clamp_keyword: Vec<Rule>,
    qualified: Vec<Rule>,
    comment: Vec<Rule>,
    string: Vec<Rule>,
}

static RULE_TABLES: OnceLock<RuleTables> = OnceLock::new();

pub(crate) fn tables() -> &'static RuleTables {
    RULE_TABLES.get_or_init(RuleTables::build)
}

impl RuleTables {
    fn build() -> Self {
        Self {
            whitespace: vec![
                Rule::at_line_start(r"\A[ \t\v\f]*#(?:r|load)\b", emit(TokenKind::Directive)),
                Rule::at_line_start(
                    r"\A[ \t\v\f]*#[A-Za-z0-9_].*",
                    emit(TokenKind::NamespaceDirective),
                ),
                Rule::new(r"\A[ \t\v\f\r\n]+", emit(TokenKind::Whitespace)),
                Rule::new(
                    r"\A/\*",
                    Action::Emit(TokenKind::Comment, Transition::Push(StateId::Comment)),
                ),
                Rule::new(r"\A//.*", emit(TokenKind::Comment)),
            ],
            root: vec![
                Rule::new(ROOT_WORD, Action::Cases(Cases::RootWord)),
                Rule::new(r"\A->", emit(TokenKind::Operator)),
                Rule::new(BRACKETS, Action::Cases(Cases::Bracket)),
                Rule::new(SYMBOLS, Action::Cases(Cases::Symbols)),
                Rule::new(
                    r#"\A""#,
                    Action::Emit(TokenKind::StringQuote, Transition::Push(StateId::String)),
                ),
                Rule::new(
                    r"\A[0-9_]*\.[0-9_]+(?:[eE][\-+]?[0-9]+)?[fFdD]?",
                    emit(TokenKind::NumberFloat),
                ),
                Rule::new(r"\A0[xX][0-9a-fA-F_]+", emit(TokenKind::NumberHex)),
                Rule::new(r"\A0[bB][01_]+", emit(TokenKind::NumberHex)),
                Rule::new(r"\A[0-9_]+[fF]", emit(TokenKind::NumberFloat)),
                Rule::new(INTEGER, emit(TokenKind::Number)),
                Rule::new(r"\A[;,]", emit(TokenKind::Delimiter)),
            ],
            endpoint_definition: endpoint_kind_words()
                .iter()
                .map(|word| {
                    Rule::new(
                        &format!(r"\A{}\b", regex::escape(word)),
                        emit(TokenKind::Keyword),
                    )
                })
                .chain([
                    Rule::new(r"\A;", Action::Emit(TokenKind::Plain, Transition::Pop)),
                    Rule::new(
                        r"\A\{",
                        Action::Emit(
                            TokenKind::Plain,
                            Transition::Push(StateId::EndpointDefinition),
                        ),
                    ),
                    Rule::new(IDENTIFIER, Action::Cases(Cases::Word)),
                    Rule::new(BRACKETS, Action::Cases(Cases::Bracket)),
                    Rule::new(r"\A,", emit(TokenKind::Delimiter)),
                    Rule::new(SYMBOLS, Action::Cases(Cases::Symbols)),
                    Rule::new(INTEGER, emit(TokenKind::Number)),
                ])
                .collect(),
            possible_wrap_clamp: vec![
                Rule::new(r"\Awrap *<", Action::Rematch(StateId::WrapClampKeyword)),
                Rule::new(r"\Awrap", Action::Emit(TokenKind::Plain, Transition::Pop)),
                Rule::new(r"\Aclamp *<", Action::Rematch(StateId::WrapClampKeyword)),
                Rule::new(r"\Aclamp", Action::Emit(TokenKind::Plain, Transition::Pop)),
                Rule::fallback(Action::PopZeroWidth),
            ],
            wrap_clamp_keyword: vec![
                Rule::new(r"\Awrap", Action::Emit(TokenKind::Keyword, Transition::Pop)),
                Rule::new(r"\Aclamp", Action::Emit(TokenKind::Keyword, Transition::Pop)),
                // Only reachable from a hand-built state
                Rule::fallback(Action::PopZeroWidth),
            ],
            qualified: vec![
                Rule::new(IDENTIFIER, Action::Cases(Cases::Word)),
                Rule::new(r"\A\.", emit(TokenKind::Delimiter)),
                Rule::fallback(Action::PopZeroWidth),
            ],
            comment: vec![
                Rule::new(r"\A[^/*]+", emit(TokenKind::Comment)),
                Rule::new(
                    r"\A\*/",
                    Action::Emit(TokenKind::Comment, Transition::Pop),
                ),
                Rule::new(r"\A[/*]", emit(TokenKind::Comment)),
            ],
            string: vec![
                Rule::new(r#"\A[^\\"]+"#, emit(TokenKind::String)),
                Rule::new(ESCAPES, emit(TokenKind::StringEscape)),
                Rule::new(
                    r#"\A""#,
                    Action::Emit(TokenKind::StringQuote, Transition::Pop),
                ),
            ],
        }
    }

    /// The state's own rules, without the shared whitespace set
    pub(crate) fn own_rules(&self, state: StateId) -> &[Rule] {
        match state {
            StateId::Root => &self.root,
            StateId::EndpointDefinition => &self.endpoint_definition,
            StateId::PossibleWrapClamp => &self.possible_wrap_clamp,
            StateId::WrapClampKeyword => &self.wrap_clamp_keyword,
            StateId::Qualified => &self.qualified,
            StateId::Comment => &self.comment,
            StateId::String => &self.string,
        }
    }

    /// Whether the shared whitespace set is tried before the state's rules.
    /// Comment and string bodies are literal text. A blank after a qualified
    /// name pops back to Root so the next word is classified there.
    pub(crate) fn uses_whitespace(state: StateId) -> bool {
        matches!(state, StateId::Root | StateId::EndpointDefinition)
    }

    /// First matching rule for `state` at the start of `rest`.
    /// Returns the consumed length and the resolved step.
    pub(crate) fn find(
        &self,
        state: StateId,
        rest: &str,
        at_line_start: bool,
    ) -> Option<(usize, Step)> {
        let shared: &[Rule] = if Self::uses_whitespace(state) {
            &self.whitespace
        } else {
            &[]
        };

        shared
            .iter()
            .chain(self.own_rules(state))
            .filter(|rule| at_line_start || !rule.line_start)
            .find_map(|rule| {
                let len = rule.match_len(rest)?;
                match rule.action.resolve(&rest[..len]) {
                    // A consuming rule must consume
                    Step::Emit(..) if len == 0 => None,
                    step @ Step::Emit(..) => Some((len, step)),
                    zero_width => Some((0, zero_width)),
                }
            })
    }

    #[cfg(test)]
    pub(crate) fn all_rules(&self) -> impl Iterator<Item = &Rule> {
        [
            &self.whitespace,
            &self.root,
            &self.endpoint_definition,
            &self.possible_wrap_clamp,
            &self.wrap_clamp_keyword,
            &self.qualified,
            &self.comment,
            &self.string,
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{BracketFamily, BracketSide};

    fn find(state: StateId, rest: &str) -> Option<(usize, Step)> {
        tables().find(state, rest, false)
    }

    #[test]
    fn test_all_patterns_compile() {
        assert!(tables()
            .all_rules()
            .all(|rule| !matches!(rule.pattern, Pattern::Never)));
    }

    #[test]
    fn test_root_word_dispatch() {
        assert_eq!(
            find(StateId::Root, "wrap<3>"),
            Some((0, Step::Rematch(StateId::PossibleWrapClamp)))
        );
        assert_eq!(
            find(StateId::Root, "output stream"),
            Some((
                6,
                Step::Emit(
                    TokenKind::Keyword,
                    Transition::Push(StateId::EndpointDefinition)
                )
            ))
        );
        assert_eq!(
            find(StateId::Root, "iffy = 1"),
            Some((
                4,
                Step::Emit(TokenKind::Identifier, Transition::Push(StateId::Qualified))
            ))
        );
    }

    #[test]
    fn test_directives_only_at_line_start() {
        let tables = tables();
        assert_eq!(
            tables.find(StateId::Root, "  #load \"x\"", true),
            Some((7, Step::Emit(TokenKind::Directive, Transition::Stay)))
        );
        assert_eq!(
            tables.find(StateId::Root, "#pragma once", true),
            Some((12, Step::Emit(TokenKind::NamespaceDirective, Transition::Stay)))
        );
        // Mid-line `#` is a symbol run
        assert_eq!(
            tables.find(StateId::Root, "#pragma once", false),
            Some((1, Step::Emit(TokenKind::Plain, Transition::Stay)))
        );
    }

    #[test]
    fn test_directive_needs_word_boundary() {
        assert_eq!(
            tables().find(StateId::Root, "#ref", true),
            Some((4, Step::Emit(TokenKind::NamespaceDirective, Transition::Stay)))
        );
        // Any non-word character ends the directive name
        assert_eq!(
            tables().find(StateId::Root, "#r.x", true),
            Some((2, Step::Emit(TokenKind::Directive, Transition::Stay)))
        );
        assert_eq!(
            tables().find(StateId::Root, "#r-", true),
            Some((2, Step::Emit(TokenKind::Directive, Transition::Stay)))
        );
    }

    #[test]
    fn test_symbol_runs() {
        assert_eq!(
            find(StateId::Root, "<<= x"),
            Some((3, Step::Emit(TokenKind::Delimiter, Transition::Stay)))
        );
        assert_eq!(
            find(StateId::Root, "<>"),
            Some((2, Step::Emit(TokenKind::Plain, Transition::Stay)))
        );
        assert_eq!(
            find(StateId::Root, "->b"),
            Some((2, Step::Emit(TokenKind::Operator, Transition::Stay)))
        );
    }

    #[test]
    fn test_brackets_resolve_family() {
        let expected = TokenKind::Bracket(Bracket {
            family: BracketFamily::Square,
            side: BracketSide::Close,
        });
        assert_eq!(
            find(StateId::Root, "]"),
            Some((1, Step::Emit(expected, Transition::Stay)))
        );
    }

    #[test]
    fn test_whitespace_not_shared_with_literal_states() {
        assert_eq!(
            find(StateId::String, "// not a comment"),
            Some((16, Step::Emit(TokenKind::String, Transition::Stay)))
        );
        assert_eq!(
            find(StateId::Comment, "  x"),
            Some((3, Step::Emit(TokenKind::Comment, Transition::Stay)))
        );
    }

    #[test]
    fn test_qualified_pops_on_blank() {
        assert_eq!(find(StateId::Qualified, " "), Some((0, Step::PopZeroWidth)));
        assert_eq!(find(StateId::Qualified, "/* x */"), Some((0, Step::PopZeroWidth)));
        assert_eq!(
            find(StateId::Qualified, "a.b"),
            Some((1, Step::Emit(TokenKind::Identifier, Transition::Stay)))
        );
    }

    #[test]
    fn test_zero_width_fallbacks() {
        assert_eq!(find(StateId::Qualified, "+"), Some((0, Step::PopZeroWidth)));
        assert_eq!(
            find(StateId::PossibleWrapClamp, "x"),
            Some((0, Step::PopZeroWidth))
        );
        assert_eq!(
            find(StateId::WrapClampKeyword, "x"),
            Some((0, Step::PopZeroWidth))
        );
    }

    #[test]
    fn test_unknown_escape_has_no_rule() {
        assert_eq!(find(StateId::String, "\\q"), None);
        assert_eq!(
            find(StateId::String, "\\x41"),
            Some((4, Step::Emit(TokenKind::StringEscape, Transition::Stay)))
        );
    }

    #[test]
    fn test_endpoint_kind_words_are_whole_words() {
        for word in endpoint_kind_words() {
            assert_eq!(
                find(StateId::EndpointDefinition, word),
                Some((word.len(), Step::Emit(TokenKind::Keyword, Transition::Stay))),
                "{}",
                word
            );
        }
        assert_eq!(
            find(StateId::EndpointDefinition, "events"),
            Some((6, Step::Emit(TokenKind::Identifier, Transition::Stay)))
        );
        assert_eq!(
            find(StateId::EndpointDefinition, "stream x"),
            Some((6, Step::Emit(TokenKind::Keyword, Transition::Stay)))
        );
    }
}
