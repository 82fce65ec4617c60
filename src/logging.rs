// src/logging.rs

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Installs the global subscriber: a daily-rolling file under `config.log_dir`,
/// plus stdout when `to_stdout` is set.
///
/// The portal passes `false` so log lines never interleave with rendered pages.
/// Keep the returned guard alive for the lifetime of the process, or buffered
/// file output is lost.
pub fn init_tracing(config: &Config, file_name: &str, to_stdout: bool) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = to_stdout.then(|| fmt::layer().with_writer(std::io::stdout).with_target(false));
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
