//! Property tests for the Soul line lexer
//!
//! Checks that for arbitrary input and any reachable start state:
//! 1. Token texts concatenate back to the line
//! 2. Tokens are contiguous and non-empty
//! 3. Output is deterministic
//! 4. Document tokenization agrees with line-by-line threading

use proptest::prelude::*;
use soul_lexer::{tokenize, tokenize_document, LexState, StateId, TokenKind};

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Arbitrary printable text without line breaks, including non-ASCII
fn arbitrary_line() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[^\n]{0,120}")
        .unwrap()
        .prop_map(|s| s)
}

/// Lines assembled from Soul-looking fragments
fn soul_like_line() -> impl Strategy<Value = String> {
    prop::collection::vec(soul_fragment(), 0..24).prop_map(|parts| parts.join(""))
}

fn soul_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just("\t".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("(".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        Just(";".to_string()),
        Just(".".to_string()),
        Just("->".to_string()),
        Just("/*".to_string()),
        Just("*/".to_string()),
        Just("//".to_string()),
        Just("\"".to_string()),
        Just("\\n".to_string()),
        Just("\\q".to_string()),
        Just("#pragma region".to_string()),
        Just("#load".to_string()),
        // Keywords
        Just("wrap".to_string()),
        Just("clamp".to_string()),
        Just("input".to_string()),
        Just("output".to_string()),
        Just("event".to_string()),
        Just("stream".to_string()),
        Just("processor".to_string()),
        Just("let".to_string()),
        // Numbers
        (0u32..100_000).prop_map(|n| n.to_string()),
        (0u32..255).prop_map(|n| format!("0x{:X}", n)),
        (0.0f64..100.0f64).prop_map(|f| format!("{:.3}f", f)),
        // Identifiers
        "@?[a-zA-Z_][a-zA-Z0-9_]{0,8}".prop_map(|s| s),
        // Stray characters
        "[$`é€]".prop_map(|s| s),
    ]
}

fn start_state() -> impl Strategy<Value = LexState> {
    prop_oneof![
        Just("root"),
        Just("qualified"),
        Just("endpoint"),
        Just("endpoint/endpoint"),
        Just("comment"),
        Just("string"),
        Just("endpoint/comment"),
        Just("qualified/comment"),
        Just("possible_wrap_clamp"),
        Just("possible_wrap_clamp/wrap_clamp_keyword"),
    ]
    .prop_map(|encoded| encoded.parse().unwrap())
}

fn assert_covers(line: &str, state: &LexState) {
    let (tokens, _) = tokenize(line, state);
    let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(joined, line);

    let mut offset = 0;
    for token in &tokens {
        assert!(!token.text.is_empty());
        assert_eq!(token.offset, offset);
        assert_eq!(&line[token.offset..token.end()], token.text);
        offset = token.end();
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tokens_cover_arbitrary_lines(line in arbitrary_line(), state in start_state()) {
        assert_covers(&line, &state);
    }

    #[test]
    fn tokens_cover_soul_like_lines(line in soul_like_line(), state in start_state()) {
        assert_covers(&line, &state);
    }

    #[test]
    fn tokenize_is_deterministic(line in soul_like_line(), state in start_state()) {
        prop_assert_eq!(tokenize(&line, &state), tokenize(&line, &state));
    }

    #[test]
    fn end_state_round_trips_through_text(line in soul_like_line(), state in start_state()) {
        let (_, end) = tokenize(&line, &state);
        let decoded: LexState = end.to_string().parse().unwrap();
        prop_assert_eq!(decoded, end);
    }

    #[test]
    fn document_matches_line_threading(lines in prop::collection::vec(soul_like_line(), 1..12)) {
        let source = lines.join("\n");
        let doc = tokenize_document(&source);
        prop_assert_eq!(doc.line_count(), lines.len());

        let mut state = LexState::root();
        for (line, cached) in lines.iter().zip(doc.lines()) {
            let (tokens, end) = tokenize(line, &state);
            prop_assert_eq!(&tokens, &cached.tokens);
            prop_assert_eq!(&cached.start_state, &state);
            state = end;
        }
        prop_assert_eq!(doc.source(), source);
    }

    #[test]
    fn wrap_argument_after_name_is_keyword(
        name in "v[a-z0-9_]{0,8}",
        blanks in "[ \t]{1,3}",
        arg in 0u32..1024,
    ) {
        let line = format!("{}{}wrap<{}>", name, blanks, arg);
        let (tokens, _) = tokenize(&line, &LexState::root());
        let wrap = tokens.iter().find(|t| t.text == "wrap");
        prop_assert_eq!(wrap.map(|t| t.kind), Some(TokenKind::Keyword));
    }

    #[test]
    fn incremental_edit_matches_fresh_scan(
        lines in prop::collection::vec(soul_like_line(), 1..10),
        replacement in soul_like_line(),
        index in 0usize..10,
    ) {
        let mut doc = tokenize_document(&lines.join("\n"));
        let index = index % lines.len();
        doc.apply_edit(index, 1, &[replacement.as_str()]);

        let fresh = tokenize_document(&doc.source());
        prop_assert_eq!(doc.lines(), fresh.lines());
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn keyword_scopes_carry_the_word() {
    let (tokens, _) = tokenize("processor Gain", &LexState::root());
    assert_eq!(tokens[0].scope_name(), "keyword.processor.soul");
    assert_eq!(tokens[2].scope_name(), "identifier.soul");
}

#[test]
fn multi_line_block_comment_then_code() {
    let doc = tokenize_document("/* header\n   more\n*/ graph G");
    let last = doc.line(2).unwrap();
    assert_eq!(last.start_state.current(), StateId::Comment);
    assert_eq!(last.tokens[0].kind, TokenKind::Comment);
    assert!(last
        .tokens
        .iter()
        .any(|t| t.kind == TokenKind::Keyword && t.text == "graph"));
}

#[test]
fn wrap_and_clamp_keep_keyword_scope_mid_line() {
    let doc = tokenize_document("const wrap<8> x;\nreturn clamp<4> (x);");
    for (index, word) in [(0, "wrap"), (1, "clamp")] {
        let line = doc.line(index).unwrap();
        let token = line.tokens.iter().find(|t| t.text == word).unwrap();
        assert_eq!(token.kind, TokenKind::Keyword, "{}", word);
        assert_eq!(token.scope_name(), format!("keyword.{}.soul", word));
        assert!(line.end_state.is_root());
    }
}

#[test]
fn endpoint_on_line_after_qualified_name() {
    let doc = tokenize_document("using Foo\n    output stream float out;");
    let second = doc.line(1).unwrap();
    assert_eq!(second.start_state.current(), StateId::Qualified);

    let keywords: Vec<&str> = second
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Keyword)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(keywords, vec!["output", "stream", "float"]);
    assert!(second.end_state.is_root());
}

#[test]
fn nested_endpoint_braces_hold_state_across_lines() {
    let doc = tokenize_document("input\n{\n  {\n    x;\n  };\n};");
    let depths: Vec<usize> = doc.lines().iter().map(|l| l.end_state.depth()).collect();
    assert_eq!(depths, vec![1, 2, 3, 2, 1, 0]);
}

#[test]
fn deep_endpoint_nesting_stops_at_limit() {
    let line = "input ".to_string() + &"{".repeat(10_000);
    let (tokens, end) = tokenize(&line, &LexState::root());
    assert_eq!(end.depth(), soul_lexer::config::compile_time::lexical::MAX_STATE_DEPTH);
    assert_eq!(tokens.len(), 2 + 10_000);
}
