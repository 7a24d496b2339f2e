//! Document tokenization metrics
//!
//! Counters are filled per line while a document is tokenized. Per-kind and
//! keyword counts are only collected when the matching preference is set.

use crate::config::runtime::LexicalPreferences;
use crate::tokens::{LexState, Token, TokenKind};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub lines: usize,
    pub total_tokens: usize,
    pub invalid_tokens: usize,
    /// Lines that end inside a string, comment or endpoint block
    pub open_line_ends: usize,
    /// Deepest state stack left at a line boundary
    pub max_state_depth: usize,

    // Runtime preference-controlled metrics
    pub kind_counts: BTreeMap<String, usize>,
    pub keyword_usage: BTreeMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if token.kind == TokenKind::Invalid {
            self.invalid_tokens += 1;
        }

        if preferences.collect_detailed_metrics {
            *self
                .kind_counts
                .entry(token.kind.name().to_string())
                .or_insert(0) += 1;
        }

        if preferences.track_keyword_usage && token.kind == TokenKind::Keyword {
            *self.keyword_usage.entry(token.text.clone()).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_line(
        &mut self,
        tokens: &[Token],
        end_state: &LexState,
        preferences: &LexicalPreferences,
    ) {
        self.lines += 1;
        for token in tokens {
            self.record_token(token, preferences);
        }
        if !end_state.is_root() {
            self.open_line_ends += 1;
        }
        self.max_state_depth = self.max_state_depth.max(end_state.depth());
    }

    /// Count for a kind name such as `"keyword"` or `"bracket"`
    pub fn kind_count(&self, name: &str) -> usize {
        self.kind_counts.get(name).copied().unwrap_or(0)
    }

    pub fn has_invalid_tokens(&self) -> bool {
        self.invalid_tokens > 0
    }

    /// Most used keywords, highest count first
    pub fn top_keywords(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut usage: Vec<(&str, usize)> = self
            .keyword_usage
            .iter()
            .map(|(keyword, count)| (keyword.as_str(), *count))
            .collect();
        usage.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        usage.truncate(limit);
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::StateId;

    fn preferences(detailed: bool, keywords: bool) -> LexicalPreferences {
        LexicalPreferences {
            collect_detailed_metrics: detailed,
            track_keyword_usage: keywords,
            ..LexicalPreferences::default()
        }
    }

    #[test]
    fn test_record_line_counts() {
        let tokens = vec![
            Token::new(TokenKind::Keyword, "if", 0),
            Token::new(TokenKind::Whitespace, " ", 2),
            Token::new(TokenKind::Invalid, "$", 3),
        ];
        let mut end = LexState::root();
        end.push(StateId::Comment);

        let mut metrics = LexicalMetrics::default();
        metrics.record_line(&tokens, &end, &preferences(true, true));

        assert_eq!(metrics.lines, 1);
        assert_eq!(metrics.total_tokens, 3);
        assert_eq!(metrics.invalid_tokens, 1);
        assert_eq!(metrics.open_line_ends, 1);
        assert_eq!(metrics.max_state_depth, 1);
        assert_eq!(metrics.kind_count("keyword"), 1);
        assert_eq!(metrics.kind_count("whitespace"), 1);
        assert_eq!(metrics.keyword_usage.get("if"), Some(&1));
        assert!(metrics.has_invalid_tokens());
    }

    #[test]
    fn test_preferences_gate_detail() {
        let tokens = vec![Token::new(TokenKind::Keyword, "let", 0)];
        let mut metrics = LexicalMetrics::default();
        metrics.record_line(&tokens, &LexState::root(), &preferences(false, false));

        assert_eq!(metrics.total_tokens, 1);
        assert!(metrics.kind_counts.is_empty());
        assert!(metrics.keyword_usage.is_empty());
    }

    #[test]
    fn test_top_keywords_ordering() {
        let prefs = preferences(false, true);
        let mut metrics = LexicalMetrics::default();
        for word in ["let", "if", "let", "for", "if", "let"] {
            metrics.record_token(&Token::new(TokenKind::Keyword, word, 0), &prefs);
        }

        assert_eq!(metrics.top_keywords(2), vec![("let", 3), ("if", 2)]);
    }

    #[test]
    fn test_metrics_serialize() {
        let metrics = LexicalMetrics::default();
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["total_tokens"], 0);
    }
}
