use std::cmp::Ordering;

use tracing::{debug, debug_span, info};

use super::{normalize_vocabulary, SuggestError, SuggestionEngine};
use crate::settings::SuggestConfig;
use crate::types::{char_len, SuggestionKind, SuggestionResult};

/// Levenshtein distance over Unicode scalar values.
///
/// Insertion, deletion and substitution each cost 1. Fills the full
/// `(|a|+1) x (|b|+1)` table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut d = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            d[i][j] = if a[i - 1] == b[j - 1] {
                d[i - 1][j - 1]
            } else {
                1 + d[i - 1][j].min(d[i][j - 1]).min(d[i - 1][j - 1])
            };
        }
    }
    d[a.len()][b.len()]
}

/// `1 - distance / max(|input|, |word|, 1)`.
fn similarity(distance: usize, input_len: usize, word_len: usize) -> f64 {
    let norm = input_len.max(word_len).max(1);
    1.0 - distance as f64 / norm as f64
}

/// Fuzzy-match engine: scans the whole vocabulary on every query.
#[derive(Default)]
pub struct EditDistanceEngine {
    words: Vec<String>,
}

struct Scored<'a> {
    word: &'a str,
    distance: usize,
    score: f64,
    position: usize,
}

/// Score descending, then distance ascending, then vocabulary position.
fn rank(a: &Scored<'_>, b: &Scored<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.distance.cmp(&b.distance))
        .then(a.position.cmp(&b.position))
}

impl EditDistanceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SuggestionEngine for EditDistanceEngine {
    fn initialize(&mut self, words: &[String]) -> Result<(), SuggestError> {
        self.words = normalize_vocabulary(words);
        info!(words = self.words.len(), "edit-distance engine initialized");
        Ok(())
    }

    fn suggestions(
        &self,
        input: &str,
        config: &SuggestConfig,
    ) -> Result<Vec<SuggestionResult>, SuggestError> {
        let input = input.to_lowercase();
        let _span = debug_span!("edit_distance_suggestions", input = input.as_str()).entered();
        let input_len = char_len(&input);

        let mut scored: Vec<Scored<'_>> = self
            .words
            .iter()
            .enumerate()
            .map(|(position, word)| {
                let distance = levenshtein(&input, word);
                Scored {
                    word: word.as_str(),
                    distance,
                    score: similarity(distance, input_len, char_len(word)),
                    position,
                }
            })
            .filter(|s| s.score >= config.min_score)
            .collect();
        scored.sort_by(rank);
        scored.truncate(config.max_suggestions);

        debug!(count = scored.len(), scanned = self.words.len(), "fuzzy matches");
        Ok(scored
            .into_iter()
            .map(|s| SuggestionResult::new(s.word, s.score, SuggestionKind::Edit))
            .collect())
    }
}
