/// Errors that can occur while talking to a Hyperview instance.
///
/// Nothing in the workspace recovers from these; they are surfaced to the caller
/// as-is and abort the run.
#[derive(Debug, thiserror::Error)]
pub enum HyperviewError {
    /// A required configuration value is missing, empty or malformed
    #[error("Configuration error: {0}")]
    Config(String),
    /// The request could not be sent or the connection dropped
    #[error("Connection error: {0}")]
    Connection(String),
    /// The request did not complete within the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// The server rejected the credentials or the bearer token (401/403)
    #[error("Authorization failed with status {status}: {body}")]
    Auth {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// Any other non-2xx response
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The response body was not JSON or did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
    /// Writing the report or an export file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Reading or writing CSV failed
    #[error("CSV error: {0}")]
    Csv(String),
}

impl HyperviewError {
    /// Whether this error was caused by the request timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, HyperviewError::Timeout(_))
    }

    /// Whether the server refused the credentials or token.
    pub fn is_auth(&self) -> bool {
        matches!(self, HyperviewError::Auth { .. })
    }
}

impl From<serde_json::Error> for HyperviewError {
    fn from(err: serde_json::Error) -> Self {
        HyperviewError::Parse(err.to_string())
    }
}

/// Result alias used across the Hyperview crates.
pub type Result<T, E = HyperviewError> = std::result::Result<T, E>;
