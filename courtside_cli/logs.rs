use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sets up the logging configuration for the driver.
///
/// Two layers are installed: one writing to stderr, so it does not interleave
/// with the rendered panel on stdout, and one writing to a daily rotating file
/// under `logs/`.
///
/// Log levels are controlled by the `RUST_LOG` environment variable. If it is
/// not set, everything logs at `info` and the courtside crates at `debug`.
/// The returned guard flushes the file writer when dropped.
pub fn setup_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "courtside.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true);

    let default_filter = "info,courtside_app=debug,courtside_cli=debug";

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
