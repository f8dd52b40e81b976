//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable, if set and valid
/// 2. `config.trace_level`, if set
/// 3. Default: `"info"`
///
/// # Output
///
/// Events go to `config.log_file` through a rotating [`FileWriter`] when a path is
/// configured, otherwise to stderr. Stdout is left free for view model output.
///
/// Idempotent: only the first call installs a subscriber; later calls are no-ops.
///
/// # Example
///
/// ```rust
/// use stayview::observability::init_tracing;
/// use stayview::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if let Some(path) = &config.log_file {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if std::fs::create_dir_all(dir).is_err() {
                // Logging is optional; fall back to stderr.
                let _ = registry.with(stderr_layer()).try_init();
                return;
            }
        }

        let writer = Arc::new(FileWriter::new(path.clone()));
        let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
        let _ = registry.with(layer).try_init();
    } else {
        let _ = registry.with(stderr_layer()).try_init();
    }
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer().with_writer(std::io::stderr)
}
