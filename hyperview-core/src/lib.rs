//! # Hyperview Core
//!
//! `hyperview-core` holds the types shared by every Hyperview API sample: the
//! configuration loader, the error taxonomy and the data model returned by the
//! asset API.
//!
//! ## Key Components
//!
//! - **[`Credentials`]**: client id, secret and instance URL, loaded from a dotenv file.
//! - **[`AccessToken`]**: the bearer token obtained through the client credentials flow.
//! - **[`AssetPage`]**, **[`Asset`]** and **[`Sensor`]**: pass-through views of the asset API.
//! - **[`BusinessEntityPage`]**: the business-entity collection, kept as raw JSON.
//! - **[`HyperviewError`]**: the error type returned by every fallible operation.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Configuration loading.
pub mod config;
/// Error taxonomy.
pub mod error;

pub use config::Credentials;
pub use error::{HyperviewError, Result};

/// An opaque bearer token.
///
/// Valid for the whole run; expiry is never checked and the token is never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// A single asset as returned by the asset list endpoint.
///
/// Only `id` and `name` are interpreted; everything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset identifier, exactly as the server sent it (quotes included, if any).
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    /// Looks up a pass-through field such as `parentName`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// One page of the asset list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPage {
    /// Paging metadata, passed through untouched.
    #[serde(rename = "_metadata")]
    pub metadata: Map<String, Value>,
    /// Assets in server order.
    pub data: Vec<Asset>,
}

/// One page of the business-entity collection.
///
/// Entities are kept as raw JSON; nothing beyond the envelope is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessEntityPage {
    /// Paging metadata, passed through untouched.
    #[serde(rename = "_metadata", default)]
    pub metadata: Map<String, Value>,
    /// Entities in server order.
    pub data: Vec<Value>,
}

/// A telemetry point attached to an asset.
///
/// The API is loose about the types of these fields (values may be numbers,
/// strings or null), so they are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    /// Sensor identifier.
    #[serde(default)]
    pub id: Value,
    /// Sensor name.
    #[serde(default)]
    pub name: Value,
    /// Timestamp of the last reading.
    #[serde(default)]
    pub last_value_update: Value,
    /// Last reading.
    #[serde(default)]
    pub value: Value,
    /// Unit of the reading.
    #[serde(default)]
    pub unit_string: Value,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sensor tagged with the asset it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSensor {
    /// The asset id the sensor was requested under.
    pub asset_id: String,
    /// The sensor itself.
    pub sensor: Sensor,
}

/// Renders a JSON value for console or CSV output.
///
/// Strings lose their quotes, `null` becomes empty, anything else is compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
