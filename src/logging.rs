//! `tracing` initialization: console output by default, an optional
//! non-blocking file appender, and an `EnvFilter` so the usual `RUST_LOG`
//! override works without a recompile. `sawtooth_sdk` logs through the `log`
//! facade rather than `tracing`, so `LogTracer` bridges its records into the
//! same subscriber.

use tracing::Level;

/// Holds the worker guard for the optional file appender alive for the
/// lifetime of the process; dropping it would stop flushing log lines.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn init(verbose: bool, log_file: Option<&str>) -> LoggingGuard {
    let _ = tracing_log::LogTracer::init();

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match log_file {
        Some(path) => {
            let appender = tracing_appender::rolling::never(".", path);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            tracing::info!(file = path, "logging to file");
            LoggingGuard {
                _file_guard: Some(guard),
            }
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            LoggingGuard { _file_guard: None }
        }
    }
}
