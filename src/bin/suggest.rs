use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use word_suggest::trace_init::init_tracing;
use word_suggest::{vocabulary, EngineKind, SuggestOptions, Suggester, SuggestionResult};

/// Engine used when neither `--engine` nor the config file names one.
const DEFAULT_ENGINE: EngineKind = EngineKind::Trie;

#[derive(Parser)]
#[command(name = "suggest", about = "Rank vocabulary words against an input")]
struct Cli {
    /// Vocabulary file (one word per line, or a JSON array for .json files)
    vocab_file: PathBuf,
    /// Partial word to complete or correct, or the context for --next
    input: String,
    /// Engine: trie, edit-distance (levenshtein) or semantic.
    /// Defaults to trie when neither this flag nor --config sets one
    #[arg(short, long)]
    engine: Option<String>,
    /// Maximum number of suggestions
    #[arg(short = 'n', long = "max")]
    max_suggestions: Option<usize>,
    /// Minimum score in [0, 1]
    #[arg(long)]
    min_score: Option<f64>,
    /// Predict the next word instead of completing the input
    #[arg(long)]
    next: bool,
    /// TOML options file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Directory for JSONL trace output (requires the `trace` feature)
    #[arg(long)]
    trace_dir: Option<PathBuf>,
}

fn load_options(cli: &Cli) -> SuggestOptions {
    let base = match &cli.config {
        Some(path) => read_options_file(path),
        None => SuggestOptions::default(),
    };
    merge_options(base, cli)
}

/// Flags over the config file, then `DEFAULT_ENGINE` if still unset.
fn merge_options(base: SuggestOptions, cli: &Cli) -> SuggestOptions {
    let flags = SuggestOptions {
        engine: cli.engine.clone(),
        max_suggestions: cli.max_suggestions,
        min_score: cli.min_score,
        enable_next_word_prediction: cli.next.then_some(true),
    };
    let merged = base.overlay(flags);
    if merged.engine.is_none() {
        SuggestOptions {
            engine: Some(DEFAULT_ENGINE.as_str().to_string()),
            ..merged
        }
    } else {
        merged
    }
}

fn read_options_file(path: &Path) -> SuggestOptions {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read config {}: {}", path.display(), e);
        process::exit(1);
    });
    SuggestOptions::from_toml(&content).unwrap_or_else(|e| {
        eprintln!("Invalid config {}: {}", path.display(), e);
        process::exit(1);
    })
}

fn print_text(results: &[SuggestionResult]) {
    if results.is_empty() {
        println!("(no suggestions)");
        return;
    }
    let width = results.iter().map(|r| r.word.chars().count()).max().unwrap_or(0);
    for (i, r) in results.iter().enumerate() {
        println!(
            "{:>2}. {:<width$}  {:>6.3}  {}",
            i + 1,
            r.word,
            r.score,
            r.kind
        );
    }
}

fn main() {
    let cli = Cli::parse();
    let _trace = init_tracing(cli.trace_dir.as_deref());

    let options = load_options(&cli);
    let mut suggester = Suggester::from_options(&options).unwrap_or_else(|e| {
        eprintln!("Failed to create suggester: {}", e);
        process::exit(1);
    });

    let words = vocabulary::load(&cli.vocab_file).unwrap_or_else(|e| {
        eprintln!(
            "Failed to load vocabulary {}: {}",
            cli.vocab_file.display(),
            e
        );
        process::exit(1);
    });
    if let Err(e) = suggester.initialize(&words) {
        eprintln!("Failed to initialize engine: {}", e);
        process::exit(1);
    }

    let result = if cli.next {
        suggester.predict_next(&cli.input)
    } else {
        suggester.suggest(&cli.input)
    };
    let results = result.unwrap_or_else(|e| {
        eprintln!("Query failed: {}", e);
        process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_text(&results);
    }
}
