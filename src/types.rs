use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Which kind of match produced a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Prefix completion from the trie engine.
    Completion,
    /// Fuzzy match from the edit-distance engine.
    Edit,
    /// Similarity match from an external semantic engine.
    Semantic,
    /// Next-word prediction.
    Next,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Edit => "edit",
            Self::Semantic => "semantic",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored candidate word.
///
/// Scores are normalized so that 1.0 is a perfect match; results from
/// different engines can be filtered with the same threshold. Engines may
/// produce scores below zero for very poor candidates, which any
/// non-negative `min_score` removes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SuggestionResult {
    pub word: String,
    pub score: f64,
    pub kind: SuggestionKind,
}

impl SuggestionResult {
    pub fn new(word: impl Into<String>, score: f64, kind: SuggestionKind) -> Self {
        Self {
            word: word.into(),
            score,
            kind,
        }
    }
}

/// Descending score order. Equal scores compare `Equal`, so a stable sort
/// keeps the engine's enumeration order for ties.
pub fn by_score_desc(a: &SuggestionResult, b: &SuggestionResult) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Keep results with `score >= min_score`, then cut to `max` entries.
/// Order is preserved; nothing is re-sorted.
pub fn filter_and_truncate(
    results: Vec<SuggestionResult>,
    min_score: f64,
    max: usize,
) -> Vec<SuggestionResult> {
    results
        .into_iter()
        .filter(|r| r.score >= min_score)
        .take(max)
        .collect()
}

/// Number of Unicode scalar values, used for every length in scoring.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
