use std::collections::BTreeMap;

use tracing::{debug, debug_span, info};

use super::{normalize_vocabulary, SuggestError, SuggestionEngine};
use crate::settings::SuggestConfig;
use crate::types::{by_score_desc, SuggestionKind, SuggestionResult};

/// Each extra character beyond the prefix costs this much score.
const EXTRA_CHAR_PENALTY: f64 = 0.1;

#[derive(Default)]
struct Node {
    // BTreeMap keeps sibling order ascending, which fixes enumeration order
    children: BTreeMap<char, Node>,
    end_of_word: bool,
}

/// Prefix-completion engine backed by a character trie.
#[derive(Default)]
pub struct TrieEngine {
    root: Node,
    len: usize,
}

impl TrieEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words in the trie.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `word` (case-insensitive) is a complete vocabulary entry.
    pub fn contains(&self, word: &str) -> bool {
        self.find(&word.to_lowercase())
            .is_some_and(|node| node.end_of_word)
    }

    fn insert(root: &mut Node, word: &str) {
        let mut node = root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        node.end_of_word = true;
    }

    fn find(&self, prefix: &str) -> Option<&Node> {
        let mut node = &self.root;
        for c in prefix.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    /// All words under `prefix`, depth-first with ascending sibling order.
    /// Each word is paired with the number of characters it adds to `prefix`.
    fn completions(&self, prefix: &str) -> Vec<(String, usize)> {
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        // Explicit stack: depth is bounded by the longest word, not the call stack.
        let mut stack = vec![(start, prefix.to_string(), 0usize)];
        while let Some((node, word, extra)) = stack.pop() {
            // Push in reverse so the smallest character is popped first.
            for (&c, child) in node.children.iter().rev() {
                let mut next = word.clone();
                next.push(c);
                stack.push((child, next, extra + 1));
            }
            if node.end_of_word {
                out.push((word, extra));
            }
        }
        out
    }
}

/// `1 - extra / 10`. Not clamped below: very long completions go negative
/// and fall out of any threshold.
fn completion_score(extra_chars: usize) -> f64 {
    1.0 - extra_chars as f64 * EXTRA_CHAR_PENALTY
}

impl SuggestionEngine for TrieEngine {
    fn initialize(&mut self, words: &[String]) -> Result<(), SuggestError> {
        let words = normalize_vocabulary(words);
        let mut root = Node::default();
        for word in &words {
            Self::insert(&mut root, word);
        }
        self.root = root;
        self.len = words.len();
        info!(words = self.len, "trie engine initialized");
        Ok(())
    }

    fn suggestions(
        &self,
        input: &str,
        _config: &SuggestConfig,
    ) -> Result<Vec<SuggestionResult>, SuggestError> {
        let prefix = input.to_lowercase();
        let _span = debug_span!("trie_suggestions", prefix = prefix.as_str()).entered();

        let mut results: Vec<SuggestionResult> = self
            .completions(&prefix)
            .into_iter()
            .map(|(word, extra)| {
                SuggestionResult::new(word, completion_score(extra), SuggestionKind::Completion)
            })
            .collect();
        // Stable: ties keep depth-first order.
        results.sort_by(by_score_desc);

        debug!(count = results.len(), "completions");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EngineKind;

    fn make_trie(words: &[&str]) -> TrieEngine {
        let mut t = TrieEngine::new();
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        t.initialize(&words).unwrap();
        t
    }

    fn words_of(results: &[SuggestionResult]) -> Vec<&str> {
        results.iter().map(|r| r.word.as_str()).collect()
    }

    fn config() -> SuggestConfig {
        SuggestConfig::new(EngineKind::Trie)
    }

    #[test]
    fn test_prefix_completions() {
        let t = make_trie(&[
            "hello",
            "world",
            "help",
            "health",
            "javascript",
            "python",
            "programming",
        ]);
        let res = t.suggestions("he", &config()).unwrap();
        assert_eq!(words_of(&res), ["help", "hello", "health"]);
        assert!((res[0].score - 0.8).abs() < 1e-9);
        assert!((res[1].score - 0.7).abs() < 1e-9);
        assert!((res[2].score - 0.6).abs() < 1e-9);
        assert!(res.iter().all(|r| r.kind == SuggestionKind::Completion));
    }

    #[test]
    fn test_missing_prefix() {
        let t = make_trie(&["hello", "help"]);
        assert!(t.suggestions("xyz", &config()).unwrap().is_empty());
        // Diverges after a shared prefix
        assert!(t.suggestions("hex", &config()).unwrap().is_empty());
    }

    #[test]
    fn test_exact_word_scores_one() {
        let t = make_trie(&["help", "helper", "helpful"]);
        let res = t.suggestions("help", &config()).unwrap();
        assert_eq!(words_of(&res), ["help", "helper", "helpful"]);
        assert_eq!(res[0].score, 1.0);
    }

    #[test]
    fn test_empty_prefix_returns_everything() {
        let t = make_trie(&["b", "ab", "a"]);
        let res = t.suggestions("", &config()).unwrap();
        // Equal scores keep depth-first ascending order
        assert_eq!(words_of(&res), ["a", "b", "ab"]);
    }

    #[test]
    fn test_ties_follow_code_point_order() {
        let t = make_trie(&["cat", "car", "cab", "can"]);
        let res = t.suggestions("ca", &config()).unwrap();
        assert_eq!(words_of(&res), ["cab", "can", "car", "cat"]);
    }

    #[test]
    fn test_long_completion_goes_negative() {
        let t = make_trie(&["a", "abcdefghijklm"]);
        let res = t.suggestions("a", &config()).unwrap();
        assert_eq!(words_of(&res), ["a", "abcdefghijklm"]);
        assert!(res[1].score < 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let t = make_trie(&["Hello", "HELP"]);
        let res = t.suggestions("HE", &config()).unwrap();
        assert_eq!(words_of(&res), ["help", "hello"]);
        assert!(t.contains("hElLo"));
        assert!(!t.contains("hel"));
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let t = make_trie(&["help", "help", "HELP"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.suggestions("h", &config()).unwrap().len(), 1);
    }

    #[test]
    fn test_multibyte_prefix() {
        let t = make_trie(&["café", "cafés", "cafe"]);
        let res = t.suggestions("caf", &config()).unwrap();
        assert_eq!(words_of(&res), ["cafe", "café", "cafés"]);
        let res = t.suggestions("café", &config()).unwrap();
        assert_eq!(words_of(&res), ["café", "cafés"]);
        assert!((res[1].score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_empty_vocabulary() {
        let t = make_trie(&[]);
        assert!(t.is_empty());
        assert!(t.suggestions("", &config()).unwrap().is_empty());
        assert!(t.suggestions("a", &config()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_word_marks_root() {
        let t = make_trie(&["hello", ""]);
        assert_eq!(t.len(), 2);
        assert!(t.contains(""));
        let res = t.suggestions("", &config()).unwrap();
        assert_eq!(words_of(&res), ["", "hello"]);
        assert_eq!(res[0].score, 1.0);
        // Only the empty prefix reaches the root word
        assert_eq!(words_of(&t.suggestions("h", &config()).unwrap()), ["hello"]);
    }

    #[test]
    fn test_whitespace_word_is_stored() {
        let t = make_trie(&["hello", " "]);
        let res = t.suggestions(" ", &config()).unwrap();
        assert_eq!(words_of(&res), [" "]);
        assert_eq!(res[0].score, 1.0);
    }

    #[test]
    fn test_reinitialize_replaces_vocabulary() {
        let mut t = make_trie(&["hello"]);
        t.initialize(&["world".to_string()]).unwrap();
        assert_eq!(t.len(), 1);
        assert!(t.contains("world"));
        assert!(!t.contains("hello"));
    }

    #[test]
    fn test_predict_next_is_empty() {
        let t = make_trie(&["hello"]);
        assert!(t.predict_next("hello", &config()).unwrap().is_empty());
    }
}
