//! Suggestion engines.
//!
//! Every engine implements [`SuggestionEngine`]. The orchestrator holds one
//! of them behind the closed [`Engine`] enum, so the set of engines is
//! checked exhaustively at compile time; the semantic variant wraps an
//! externally supplied implementation of the same contract.

use std::collections::HashSet;
use std::io;

use crate::settings::{EngineKind, SettingsError, SuggestConfig};
use crate::types::SuggestionResult;

pub mod edit_distance;
pub mod trie;

pub use edit_distance::{levenshtein, EditDistanceEngine};
pub use trie::TrieEngine;

/// Error type shared by the engines, the orchestrator and the loaders.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),

    #[error("invalid vocabulary entry at index {index}: {reason}")]
    Validation { index: usize, reason: String },

    #[error("semantic engine selected but no implementation was supplied")]
    SemanticEngineMissing,

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("engine error: {0}")]
    Engine(Box<dyn std::error::Error + Send + Sync>),
}

impl SuggestError {
    /// Wrap a failure reported by an external engine.
    pub fn engine(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Engine(err.into())
    }
}

/// The contract every suggestion engine satisfies.
///
/// `initialize` is called once before any query and must either fully
/// succeed or leave the engine as it was. Queries take `&self` and must not
/// mutate observable state, so an initialized engine can be shared between
/// threads. Engines may return more results than `config` allows; the
/// orchestrator applies `min_score` and `max_suggestions`.
pub trait SuggestionEngine: Send + Sync {
    fn initialize(&mut self, words: &[String]) -> Result<(), SuggestError>;

    fn suggestions(
        &self,
        input: &str,
        config: &SuggestConfig,
    ) -> Result<Vec<SuggestionResult>, SuggestError>;

    /// Engines without next-word capability return nothing.
    fn predict_next(
        &self,
        _context: &str,
        _config: &SuggestConfig,
    ) -> Result<Vec<SuggestionResult>, SuggestError> {
        Ok(Vec::new())
    }
}

/// The engine owned by a `Suggester`.
pub enum Engine {
    Trie(TrieEngine),
    EditDistance(EditDistanceEngine),
    Semantic(Box<dyn SuggestionEngine>),
}

impl Engine {
    /// Build the built-in engine for `kind`.
    ///
    /// The semantic engine lives outside this crate; selecting it here fails
    /// with `SemanticEngineMissing`. Use [`Engine::Semantic`] directly to
    /// supply one.
    pub fn build(kind: EngineKind) -> Result<Self, SuggestError> {
        match kind {
            EngineKind::Trie => Ok(Self::Trie(TrieEngine::new())),
            EngineKind::EditDistance => Ok(Self::EditDistance(EditDistanceEngine::new())),
            EngineKind::Semantic => Err(SuggestError::SemanticEngineMissing),
        }
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Self::Trie(_) => EngineKind::Trie,
            Self::EditDistance(_) => EngineKind::EditDistance,
            Self::Semantic(_) => EngineKind::Semantic,
        }
    }

    fn as_dyn(&self) -> &(dyn SuggestionEngine + 'static) {
        match self {
            Self::Trie(e) => e,
            Self::EditDistance(e) => e,
            Self::Semantic(e) => &**e,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut (dyn SuggestionEngine + 'static) {
        match self {
            Self::Trie(e) => e,
            Self::EditDistance(e) => e,
            Self::Semantic(e) => &mut **e,
        }
    }
}

impl SuggestionEngine for Engine {
    fn initialize(&mut self, words: &[String]) -> Result<(), SuggestError> {
        self.as_dyn_mut().initialize(words)
    }

    fn suggestions(
        &self,
        input: &str,
        config: &SuggestConfig,
    ) -> Result<Vec<SuggestionResult>, SuggestError> {
        self.as_dyn().suggestions(input, config)
    }

    fn predict_next(
        &self,
        context: &str,
        config: &SuggestConfig,
    ) -> Result<Vec<SuggestionResult>, SuggestError> {
        self.as_dyn().predict_next(context, config)
    }
}

/// Lowercase a vocabulary and drop repeats, keeping first-occurrence order.
///
/// Every string is accepted, including `""` and whitespace-only entries.
pub(crate) fn normalize_vocabulary(words: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(words.len());
    let mut out = Vec::with_capacity(words.len());
    for word in words {
        let lower = word.to_lowercase();
        if seen.insert(lower.clone()) {
            out.push(lower);
        }
    }
    out
}
