//! Suggester configuration.
//!
//! - `SuggestOptions` is the caller-supplied partial view; every field is optional
//! - `SuggestOptions::resolve()` merges it over the embedded defaults into a `SuggestConfig`
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::engine::SuggestError;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("missing required setting: {0}")]
    MissingField(&'static str),
}

/// The closed set of engines a `Suggester` can be built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Trie,
    EditDistance,
    Semantic,
}

impl EngineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trie => "trie",
            Self::EditDistance => "edit-distance",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = SuggestError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trie" => Ok(Self::Trie),
            "edit-distance" | "edit_distance" | "levenshtein" => Ok(Self::EditDistance),
            "semantic" | "transformer" => Ok(Self::Semantic),
            _ => Err(SuggestError::UnsupportedEngine(name.to_string())),
        }
    }
}

/// Resolved, immutable configuration shared by the orchestrator and engines.
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestConfig {
    pub engine: EngineKind,
    pub max_suggestions: usize,
    pub min_score: f64,
    pub enable_next_word_prediction: bool,
}

impl SuggestConfig {
    /// Configuration for `engine` with every other field at its default.
    pub fn new(engine: EngineKind) -> Self {
        let d = defaults();
        Self {
            engine,
            max_suggestions: d.max_suggestions,
            min_score: d.min_score,
            enable_next_word_prediction: d.enable_next_word_prediction,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct Defaults {
    max_suggestions: usize,
    min_score: f64,
    enable_next_word_prediction: bool,
}

fn defaults() -> &'static Defaults {
    static INSTANCE: OnceLock<Defaults> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        toml::from_str(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    })
}

/// Caller-supplied options, merged over the defaults by [`SuggestOptions::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestOptions {
    pub engine: Option<String>,
    pub max_suggestions: Option<usize>,
    pub min_score: Option<f64>,
    pub enable_next_word_prediction: Option<bool>,
}

impl SuggestOptions {
    /// Options selecting `engine` and nothing else.
    pub fn engine(name: impl Into<String>) -> Self {
        Self {
            engine: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, SettingsError> {
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn overlay(self, other: SuggestOptions) -> Self {
        Self {
            engine: other.engine.or(self.engine),
            max_suggestions: other.max_suggestions.or(self.max_suggestions),
            min_score: other.min_score.or(self.min_score),
            enable_next_word_prediction: other
                .enable_next_word_prediction
                .or(self.enable_next_word_prediction),
        }
    }

    /// Merge over the defaults and validate.
    pub fn resolve(&self) -> Result<SuggestConfig, SuggestError> {
        let name = self
            .engine
            .as_deref()
            .ok_or(SettingsError::MissingField("engine"))?;
        let mut config = SuggestConfig::new(name.parse()?);
        if let Some(max) = self.max_suggestions {
            config.max_suggestions = max;
        }
        if let Some(min) = self.min_score {
            config.min_score = min;
        }
        if let Some(enable) = self.enable_next_word_prediction {
            config.enable_next_word_prediction = enable;
        }
        validate(&config)?;
        Ok(config)
    }
}

pub(crate) fn validate(c: &SuggestConfig) -> Result<(), SettingsError> {
    if c.max_suggestions == 0 {
        return Err(SettingsError::InvalidValue {
            field: "max_suggestions".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    // NaN fails the range check as well
    if !(0.0..=1.0).contains(&c.min_score) {
        return Err(SettingsError::InvalidValue {
            field: "min_score".to_string(),
            reason: format!("must be within [0, 1], got {}", c.min_score),
        });
    }
    Ok(())
}
