//! The orchestrator: owns configuration, one engine, and the shared
//! filter / truncate pipeline.

use tracing::{debug, debug_span, info};

use crate::engine::{Engine, SuggestError, SuggestionEngine};
use crate::settings::{validate, EngineKind, SuggestConfig, SuggestOptions};
use crate::types::{filter_and_truncate, SuggestionResult};


pub struct Suggester {
    config: SuggestConfig,
    engine: Engine,
    initialized: bool,
}

impl Suggester {
    /// Build the engine named by `config.engine`.
    ///
    /// Fails with `SemanticEngineMissing` for the semantic engine, which must
    /// be supplied through [`Suggester::with_engine`], and with a settings
    /// error when `max_suggestions` is zero or `min_score` is outside `[0, 1]`.
    pub fn new(config: SuggestConfig) -> Result<Self, SuggestError> {
        validate(&config)?;
        let engine = Engine::build(config.engine)?;
        Ok(Self::assemble(config, engine))
    }

    /// Resolve partial options over the defaults and build the engine.
    /// An unrecognized engine name fails with `UnsupportedEngine`.
    pub fn from_options(options: &SuggestOptions) -> Result<Self, SuggestError> {
        Self::new(options.resolve()?)
    }

    /// Use an externally supplied engine; `config.engine` is set to match it.
    pub fn with_engine(mut config: SuggestConfig, engine: Engine) -> Result<Self, SuggestError> {
        validate(&config)?;
        config.engine = engine.kind();
        Ok(Self::assemble(config, engine))
    }

    fn assemble(config: SuggestConfig, engine: Engine) -> Self {
        info!(
            engine = %config.engine,
            max_suggestions = config.max_suggestions,
            min_score = config.min_score,
            next_word = config.enable_next_word_prediction,
            "suggester created"
        );
        Self {
            config,
            engine,
            initialized: false,
        }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.engine.kind()
    }

    /// Whether `initialize` has completed successfully at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Hand the vocabulary to the engine. The built-in engines accept every
    /// string; an external engine may still fail, and the error is returned as is.
    pub fn initialize<S: AsRef<str>>(&mut self, words: &[S]) -> Result<(), SuggestError> {
        let words: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
        self.engine.initialize(&words)?;
        self.initialized = true;
        Ok(())
    }

    /// Engine suggestions with `score >= min_score`, capped at
    /// `max_suggestions`, in the engine's order.
    pub fn suggest(&self, input: &str) -> Result<Vec<SuggestionResult>, SuggestError> {
        let _span = debug_span!("suggest", engine = %self.config.engine, input).entered();
        let raw = self.engine.suggestions(input, &self.config)?;
        let raw_count = raw.len();
        let results = filter_and_truncate(raw, self.config.min_score, self.config.max_suggestions);
        debug!(raw_count, count = results.len(), "suggest");
        Ok(results)
    }

    /// Next-word predictions, or nothing when the feature is disabled.
    ///
    /// Gated results are capped at `max_suggestions` but not filtered by
    /// `min_score`: next-word scores are likelihoods, not similarities.
    pub fn predict_next(&self, context: &str) -> Result<Vec<SuggestionResult>, SuggestError> {
        if !self.config.enable_next_word_prediction {
            return Ok(Vec::new());
        }
        let _span = debug_span!("predict_next", engine = %self.config.engine, context).entered();
        let mut results = self.engine.predict_next(context, &self.config)?;
        results.truncate(self.config.max_suggestions);
        debug!(count = results.len(), "predict_next");
        Ok(results)
    }
}
