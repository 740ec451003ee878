//! # Hyperview Flow
//!
//! `hyperview-flow` performs the HTTP calls of the Hyperview asset API. It sits
//! between the types in `hyperview-core` and the orchestration in the `hyperview`
//! facade.
//!
//! ## Key Components
//!
//! - **[`ApiClient`]**: the single HTTP client of a run, with its per-request timeout.
//! - **[`ClientCredentialsFlow`]**: exchanges client credentials for a bearer token.
//! - **[`AssetLister`]**: fetches the first page of CRAC assets.
//! - **[`BusinessEntityLister`]**: fetches the first 100 business entities.
//! - **[`SensorFetcher`]**: fetches the sensors of one asset.

#![warn(missing_docs)]

use hyperview_core::{HyperviewError, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Asset list requests.
pub mod assets;
/// Business-entity collection requests.
pub mod business_entities;
/// Client Credentials flow implementation.
pub mod client_credentials_flow;
/// Per-asset sensor requests.
pub mod sensors;

pub use assets::AssetLister;
pub use business_entities::BusinessEntityLister;
pub use client_credentials_flow::{ClientCredentialsFlow, OAuthToken};
pub use sensors::SensorFetcher;

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The HTTP client used for every call of a run.
///
/// Built once and passed by reference; it holds the connection pool and the
/// instance base URL, nothing else.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url: String = base_url.into();
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HyperviewError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http_client,
        })
    }

    /// The instance base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Sends `request` and decodes the JSON body into `T`.
    ///
    /// 401/403 become [`HyperviewError::Auth`], any other non-2xx status becomes
    /// [`HyperviewError::Status`] with the raw body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(HyperviewError::Auth {
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            return Err(HyperviewError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            HyperviewError::Parse(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

fn transport_error(err: reqwest::Error) -> HyperviewError {
    if err.is_timeout() {
        HyperviewError::Timeout(err.to_string())
    } else {
        HyperviewError::Connection(err.to_string())
    }
}
