//! Multi-line document tokenization
//!
//! A document caches the tokens and the start/end state of every line. After
//! an edit, lines are re-scanned only until the incoming state matches the
//! state a cached line was scanned from; from there on the cache is reused.

use super::analyzer::LexicalAnalyzer;
use super::metrics::LexicalMetrics;
use crate::config::compile_time::document::*;
use crate::logging::codes;
use crate::tokens::{LexState, Token};
use crate::utils::{Span, Spanned};
use crate::{log_debug, log_performance, log_warning};
use serde::Serialize;
use std::time::Instant;

/// Terminator that followed a line in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineEnding {
    /// Last line of the document
    None,
    Lf,
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    pub const fn len(self) -> usize {
        self.as_str().len()
    }
}

/// One cached line of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenizedLine {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the line within the document
    pub offset: usize,
    pub text: String,
    pub ending: LineEnding,
    pub tokens: Vec<Token>,
    pub start_state: LexState,
    pub end_state: LexState,
}

impl TokenizedLine {
    /// Document span of one of this line's tokens
    pub fn span_of(&self, token: &Token) -> Span {
        Span::within_line(
            self.number as u32,
            self.offset,
            &self.text,
            token.offset,
            token.end(),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenizedDocument {
    name: Option<String>,
    lines: Vec<TokenizedLine>,
    metrics: LexicalMetrics,
    #[serde(skip)]
    analyzer: LexicalAnalyzer,
}

/// Tokenize a whole source text from the Root state
pub fn tokenize_document(source: &str) -> TokenizedDocument {
    TokenizedDocument::new(source)
}

/// Tokenize a source text, tagging log events with `name`
pub fn tokenize_named_document(name: &str, source: &str) -> TokenizedDocument {
    TokenizedDocument::with_analyzer(Some(name), source, LexicalAnalyzer::new())
}

impl TokenizedDocument {
    pub fn new(source: &str) -> Self {
        Self::with_analyzer(None, source, LexicalAnalyzer::new())
    }

    pub fn with_analyzer(name: Option<&str>, source: &str, analyzer: LexicalAnalyzer) -> Self {
        let mut document = Self {
            name: name.map(str::to_string),
            lines: Vec::new(),
            metrics: LexicalMetrics::default(),
            analyzer,
        };
        document.in_context(|doc| doc.scan_source(source));
        document
    }

    fn scan_source(&mut self, source: &str) {
        let started = Instant::now();
        let mut state = LexState::root();

        for (text, ending) in split_lines(source) {
            let line = self.scan(text, ending, &state);
            state = line.end_state.clone();
            self.lines.push(line);
        }

        if self.lines.len() > MAX_DOCUMENT_LINES {
            log_warning!(code = codes::document::TOO_MANY_LINES,
                "Document exceeds the line limit",
                "lines" => self.lines.len(),
                "limit" => MAX_DOCUMENT_LINES
            );
        }

        self.relayout();

        log_performance!(codes::success::TOKENIZATION_COMPLETE, "Document tokenized",
            duration = started.elapsed(),
            "lines" => self.metrics.lines,
            "tokens" => self.metrics.total_tokens,
            "invalid" => self.metrics.invalid_tokens
        );
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn lines(&self) -> &[TokenizedLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&TokenizedLine> {
        self.lines.get(index)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// State left after the last line
    pub fn end_state(&self) -> LexState {
        self.lines
            .last()
            .map(|line| line.end_state.clone())
            .unwrap_or_default()
    }

    /// All tokens in document order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.lines.iter().flat_map(|line| line.tokens.iter())
    }

    /// All tokens with document spans
    pub fn spanned_tokens(&self) -> impl Iterator<Item = Spanned<&Token>> {
        self.lines.iter().flat_map(|line| {
            line.tokens
                .iter()
                .map(move |token| Spanned::new(token, line.span_of(token)))
        })
    }

    /// Reassemble the source text, including the original line endings
    pub fn source(&self) -> String {
        let mut source = String::new();
        for line in &self.lines {
            source.push_str(&line.text);
            source.push_str(line.ending.as_str());
        }
        source
    }

    /// Replace every line from `line_index` onward with `new_lines`.
    /// Returns how many lines were scanned again.
    pub fn retokenize_from(&mut self, line_index: usize, new_lines: &[&str]) -> usize {
        self.apply_edit(line_index, usize::MAX, new_lines)
    }

    /// Replace `removed` lines starting at `first_line` with `inserted`.
    ///
    /// Inserted lines must not contain line breaks. A replaced line whose text
    /// and incoming state are unchanged keeps its cached tokens, as does every
    /// following line once the incoming state matches its cached start state.
    /// Returns how many lines were scanned again.
    pub fn apply_edit(&mut self, first_line: usize, removed: usize, inserted: &[&str]) -> usize {
        self.in_context(|doc| doc.splice(first_line, removed, inserted))
    }

    fn splice(&mut self, first_line: usize, removed: usize, inserted: &[&str]) -> usize {
        let started = Instant::now();

        let first = if first_line > self.lines.len() {
            log_warning!(code = codes::document::LINE_INDEX_OUT_OF_RANGE,
                "Edit starts past the last line",
                "line_index" => first_line,
                "line_count" => self.lines.len()
            );
            self.lines.len()
        } else {
            first_line
        };
        let removed = removed.min(self.lines.len() - first);

        let tail = self.lines.split_off(first + removed);
        let mut replaced = self.lines.split_off(first).into_iter();
        let mut state = self.end_state();
        let mut rescanned = 0;

        for text in inserted {
            let line = match replaced.next() {
                Some(old) if old.text == *text && old.start_state == state => old,
                _ => {
                    rescanned += 1;
                    self.scan(text, LineEnding::Lf, &state)
                }
            };
            state = line.end_state.clone();
            self.lines.push(line);
        }

        for old in tail {
            let line = if old.start_state == state {
                old
            } else {
                rescanned += 1;
                self.scan(&old.text, old.ending, &state)
            };
            state = line.end_state.clone();
            self.lines.push(line);
        }

        // A document always has at least one, possibly empty, line
        if self.lines.is_empty() {
            rescanned += 1;
            let line = self.scan("", LineEnding::None, &LexState::root());
            self.lines.push(line);
        }

        self.relayout();

        log_debug!("Edit applied",
            "first_line" => first,
            "removed" => removed,
            "inserted" => inserted.len(),
            "rescanned" => rescanned
        );
        log_performance!(codes::success::RETOKENIZATION_COMPLETE, "Document re-tokenized",
            duration = started.elapsed(),
            "rescanned" => rescanned,
            "lines" => self.lines.len()
        );

        rescanned
    }

    fn scan(&self, text: &str, ending: LineEnding, start: &LexState) -> TokenizedLine {
        if text.len() > MAX_LINE_LENGTH {
            log_warning!(code = codes::document::LINE_TOO_LONG,
                "Line exceeds the length limit",
                "length" => text.len(),
                "limit" => MAX_LINE_LENGTH
            );
        }

        let (tokens, end_state) = self.analyzer.tokenize_line(text, start);
        TokenizedLine {
            number: 0,
            offset: 0,
            text: text.to_string(),
            ending,
            tokens,
            start_state: start.clone(),
            end_state,
        }
    }

    /// Renumber lines, recompute offsets and endings, and rebuild metrics
    fn relayout(&mut self) {
        let last = self.lines.len().saturating_sub(1);
        let mut offset = 0;
        let mut metrics = LexicalMetrics::default();

        for (index, line) in self.lines.iter_mut().enumerate() {
            line.number = index + 1;
            line.offset = offset;
            if index == last {
                line.ending = LineEnding::None;
            } else if line.ending == LineEnding::None {
                line.ending = LineEnding::Lf;
            }
            offset += line.text.len() + line.ending.len();
            metrics.record_line(&line.tokens, &line.end_state, self.analyzer.preferences());
        }

        self.metrics = metrics;
    }

    fn in_context<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        match self.name.clone() {
            Some(name) => crate::logging::with_document_context(&name, || f(self)),
            None => f(self),
        }
    }
}

/// Split on `\n`, treating a preceding `\r` as part of the terminator
fn split_lines(source: &str) -> impl Iterator<Item = (&str, LineEnding)> {
    let mut pieces = source.split('\n').peekable();
    std::iter::from_fn(move || {
        let piece = pieces.next()?;
        if pieces.peek().is_none() {
            return Some((piece, LineEnding::None));
        }
        Some(match piece.strip_suffix('\r') {
            Some(text) => (text, LineEnding::CrLf),
            None => (piece, LineEnding::Lf),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{StateId, TokenKind};

    const PROGRAM: &str = "graph Synth\n{\n    output stream float out;\n    /* gain\n       stage */\n    let s = \"x\";\n}";

    #[test]
    fn test_lines_and_states_thread() {
        let doc = tokenize_document(PROGRAM);
        assert_eq!(doc.line_count(), 7);

        for pair in doc.lines().windows(2) {
            assert_eq!(pair[0].end_state, pair[1].start_state);
        }
        assert_eq!(doc.line(3).map(|l| l.end_state.current()), Some(StateId::Comment));
        assert!(doc.end_state().is_root());
    }

    #[test]
    fn test_source_round_trip_keeps_endings() {
        let source = "let a = 1;\r\nlet b = 2;\n\nx";
        let doc = tokenize_document(source);
        assert_eq!(doc.source(), source);
        assert_eq!(doc.line(0).map(|l| l.ending), Some(LineEnding::CrLf));
        assert_eq!(doc.line(0).map(|l| l.text.as_str()), Some("let a = 1;"));
        assert_eq!(doc.line(3).map(|l| l.offset), Some(source.len() - 1));
    }

    #[test]
    fn test_empty_document_has_one_line() {
        let doc = tokenize_document("");
        assert_eq!(doc.line_count(), 1);
        assert!(doc.tokens().next().is_none());
    }

    #[test]
    fn test_spanned_tokens_use_document_coordinates() {
        let source = "a\n  é b c";
        let doc = tokenize_document(source);
        let spans: Vec<_> = doc
            .spanned_tokens()
            .filter(|s| s.value.kind == TokenKind::Identifier)
            .map(|s| (s.value.text.clone(), s.span))
            .collect();

        assert_eq!(spans[1].0, "b");
        assert_eq!(spans[1].1.start.line, 2);
        assert_eq!(spans[1].1.start.column, 5);
        assert_eq!(spans[1].1.start.offset, 7);
        assert_eq!(spans[2].1.start.column, 7);
        assert_eq!(spans[2].1.slice(source), "c");
    }

    #[test]
    fn test_edit_inside_line_stops_when_states_converge() {
        let mut doc = tokenize_document(PROGRAM);
        let rescanned = doc.apply_edit(2, 1, &["    input event float in;"]);
        assert_eq!(rescanned, 1);
        assert_eq!(doc.line_count(), 7);
        assert_eq!(doc.source(), PROGRAM.replace("output stream float out", "input event float in"));
    }

    #[test]
    fn test_opening_comment_propagates() {
        let mut doc = tokenize_document("a\nb\nc");
        let rescanned = doc.apply_edit(0, 1, &["a /*"]);
        assert_eq!(rescanned, 3);
        assert!(doc
            .lines()
            .iter()
            .skip(1)
            .all(|line| line.tokens.iter().all(|t| t.kind == TokenKind::Comment)));

        // Closing it again re-scans the same lines
        let rescanned = doc.apply_edit(0, 1, &["a"]);
        assert_eq!(rescanned, 3);
        assert_eq!(doc.line(2).map(|l| l.tokens[0].kind), Some(TokenKind::Identifier));
    }

    #[test]
    fn test_retokenize_from_matches_fresh_scan() {
        let mut doc = tokenize_document(PROGRAM);
        let rescanned = doc.retokenize_from(3, &["    \"open", "still open\";", "}"]);

        let fresh = tokenize_document(&doc.source());
        assert_eq!(doc.lines(), fresh.lines());
        assert_eq!(doc.metrics(), fresh.metrics());
        assert_eq!(rescanned, 3);
        assert_eq!(doc.line_count(), 6);
    }

    #[test]
    fn test_retokenize_with_identical_text_reuses_cache() {
        let mut doc = tokenize_document(PROGRAM);
        let unchanged: Vec<&str> = PROGRAM.split('\n').skip(2).collect();
        assert_eq!(doc.retokenize_from(2, &unchanged), 0);
        assert_eq!(doc.source(), PROGRAM);
    }

    #[test]
    fn test_out_of_range_edit_appends() {
        let mut doc = tokenize_document("a");
        let rescanned = doc.apply_edit(10, 0, &["b"]);
        assert_eq!(rescanned, 1);
        assert_eq!(doc.source(), "a\nb");
    }

    #[test]
    fn test_removing_every_line_leaves_empty_line() {
        let mut doc = tokenize_document("a\nb");
        doc.apply_edit(0, 2, &[]);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.source(), "");
    }

    #[test]
    fn test_named_document() {
        let doc = tokenize_named_document("synth.soul", "graph G {}");
        assert_eq!(doc.name(), Some("synth.soul"));
        assert!(crate::logging::get_current_document_context().is_none());
    }

    #[test]
    fn test_metrics_follow_edits() {
        let mut doc = tokenize_document("a $");
        assert_eq!(doc.metrics().invalid_tokens, 1);
        doc.apply_edit(0, 1, &["a"]);
        assert_eq!(doc.metrics().invalid_tokens, 0);
        assert_eq!(doc.metrics().lines, 1);
    }

    #[test]
    fn test_split_lines() {
        let pieces: Vec<_> = split_lines("a\r\nb\n").collect();
        assert_eq!(
            pieces,
            vec![("a", LineEnding::CrLf), ("b", LineEnding::Lf), ("", LineEnding::None)]
        );
    }
}
