//! Word suggestion engines for autocomplete and spell assist.
//!
//! A [`Suggester`] owns one engine (prefix completion over a trie, or fuzzy
//! matching by edit distance, or an externally supplied semantic engine)
//! and applies the same threshold / cap pipeline to whatever it returns.

pub mod engine;
pub mod settings;
pub mod suggester;
pub mod trace_init;
pub mod types;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use engine::{Engine, SuggestError, SuggestionEngine};
pub use settings::{EngineKind, SuggestConfig, SuggestOptions};
pub use suggester::Suggester;
pub use types::{SuggestionKind, SuggestionResult};
