//! Shared start-up for the sample binaries: env file, logging and credentials.

use hyperview::core::config;
use hyperview::{Credentials, Result};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over `level`; output goes to stderr.
pub fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Loads the env file, starts logging and reads the credentials.
///
/// Fails before any request is made if a required value is missing.
pub fn bootstrap(env_file: Option<&Path>) -> Result<Credentials> {
    let loaded = config::load_env_file(env_file)?;

    let level = config::log_level(|key| std::env::var(key).ok())?;
    init_logging(level);
    tracing::info!("Starting application with log level {}", level);
    match loaded {
        Some(path) => tracing::debug!("Loaded configuration from {}", path.display()),
        None => tracing::debug!(
            "No {} file found, using process environment",
            config::DEFAULT_ENV_FILE
        ),
    }

    Credentials::from_env()
}
