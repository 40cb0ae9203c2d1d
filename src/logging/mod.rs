/*!
 * Logging Module
 * Console plus rolling file output, JSON in production
 */
pub mod config;
pub mod middleware;

pub use config::LogConfig;

use std::io;
use tracing::Subscriber;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling,
};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter,
    Layer,
};

/// Writer guards; buffered lines are flushed when these drop, so hold them
/// for the life of the process.
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// JSON lines at ERROR level only, for `error.log`.
fn error_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::ERROR)
}

/// Initialize the logging system
pub fn init(config: &LogConfig) -> LogGuards {
    if let Err(e) = std::fs::create_dir_all(&config.dir) {
        eprintln!("Could not create log directory {}: {}", config.dir.display(), e);
    }

    // File appender for all logs
    let (file_writer, file_guard) = non_blocking(rolling::daily(&config.dir, "app.log"));
    // File appender for errors only
    let (error_writer, error_guard) = non_blocking(rolling::daily(&config.dir, "error.log"));
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if config.json {
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        let console_layer = fmt::layer().json().with_writer(console_writer).with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer(error_writer))
            .with(console_layer)
            .try_init()
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let console_layer = fmt::layer().with_writer(console_writer).with_target(true).pretty();

        subscriber
            .with(file_layer)
            .with(error_layer(error_writer))
            .with(console_layer)
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }

    tracing::info!("Logging initialized for {} environment", config.environment);

    LogGuards {
        _guards: vec![file_guard, error_guard, console_guard],
    }
}
