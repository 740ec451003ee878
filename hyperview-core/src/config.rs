use crate::error::{HyperviewError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

/// Environment key holding the OAuth2 client identifier.
pub const CLIENT_ID: &str = "CLIENT_ID";
/// Environment key holding the OAuth2 client secret.
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
/// Environment key holding the base URL of the Hyperview instance.
pub const INSTANCE_URL: &str = "INSTANCE_URL";
/// Environment key selecting the log level when `RUST_LOG` is unset.
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Default env file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Client credentials and the instance they belong to.
///
/// Loaded once at startup and never written anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The client ID assigned to the integration.
    pub client_id: String,
    /// The client secret assigned to the integration.
    pub client_secret: String,
    /// Base URL of the instance, without a trailing slash.
    pub base_url: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Credentials {
    /// Creates a new `Credentials` value. Trailing slashes are removed from `base_url`.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `CLIENT_ID`, `CLIENT_SECRET` and `INSTANCE_URL` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the credentials through an arbitrary key lookup.
    ///
    /// Missing and empty values are both rejected, naming the offending key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(HyperviewError::Config(format!("{} not set", key))),
            }
        };

        Ok(Self::new(
            require(CLIENT_ID)?,
            require(CLIENT_SECRET)?,
            require(INSTANCE_URL)?,
        ))
    }
}

/// Loads an env file into the process environment.
///
/// With `path` set, the file must exist. Without it, `.env` in the working
/// directory is loaded if present and skipped otherwise (`Ok(None)`). Variables
/// that are already set are left untouched.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|_| Some(path.to_path_buf()))
            .map_err(|e| {
                HyperviewError::Config(format!(
                    "Failed to load env file {}: {}",
                    path.display(),
                    e
                ))
            }),
        None => match dotenvy::from_filename(DEFAULT_ENV_FILE) {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(HyperviewError::Config(format!(
                "Failed to load {}: {}",
                DEFAULT_ENV_FILE, e
            ))),
        },
    }
}

/// Resolves `LOG_LEVEL` through `lookup`, defaulting to `error`.
///
/// Accepts the `tracing` level names as well as `WARNING`, `CRITICAL` and
/// `FATAL`, case-insensitive.
pub fn log_level<F>(lookup: F) -> Result<Level>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(LOG_LEVEL) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(Level::ERROR),
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "warning" => Ok(Level::WARN),
        "critical" | "fatal" => Ok(Level::ERROR),
        other => Level::from_str(other).map_err(|_| {
            HyperviewError::Config(format!("Unable to set {} to {}", LOG_LEVEL, raw))
        }),
    }
}
