use tracing_subscriber::EnvFilter;

use crate::config::{init_global_settings, Settings};

/// Installs `settings` as the process-wide settings and a `fmt` subscriber filtered by
/// `RUST_LOG`, or by the configured verbosity when `RUST_LOG` is unset.
///
/// Meant to be called once at startup. Later calls leave the existing settings and subscriber
/// in place.
pub fn init_logging(settings: &Settings) {
    if !init_global_settings(settings.clone()) {
        tracing::debug!("global settings already initialized");
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_verbosity.as_str()));

    let res = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
