//! Structured trace output, compiled in only with the `trace` feature.

use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Keeps the file writer alive; trace lines are flushed when it drops.
#[must_use]
pub struct TraceGuard {
    #[cfg(feature = "trace")]
    _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Install a JSON subscriber writing to `log_dir/word-suggest-trace.jsonl`,
/// or to stderr when `log_dir` is `None`. Only the first call has an effect.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) -> TraceGuard {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let mut guard = None;
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("word_suggest=debug"));
        let builder = tracing_subscriber::fmt()
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter);
        match log_dir {
            Some(dir) => {
                let file_appender =
                    tracing_appender::rolling::never(dir, "word-suggest-trace.jsonl");
                let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
                guard = Some(g);
                builder.with_writer(non_blocking).init();
            }
            None => builder.with_writer(std::io::stderr).init(),
        }
    });
    TraceGuard { _guard: guard }
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: Option<&Path>) -> TraceGuard {
    TraceGuard {}
}
