use crate::ApiClient;
use hyperview_core::{AccessToken, Result, Sensor};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

/// Sensor endpoint prefix, relative to the instance URL.
pub const SENSORS_PATH: &str = "/api/asset/sensors";

/// Removes every literal `"` from an asset id.
///
/// Asset ids coming out of the list response may still be JSON-quoted.
pub fn strip_quotes(asset_id: &str) -> String {
    asset_id.replace('"', "")
}

/// Request path for the sensors of `asset_id`.
pub fn sensor_path(asset_id: &str) -> String {
    format!("{}/{}", SENSORS_PATH, strip_quotes(asset_id))
}

/// Fetches the current sensor readings of a single asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorFetcher;

impl SensorFetcher {
    /// Creates the fetcher.
    pub fn new() -> Self {
        Self
    }

    /// Requests the sensors of `asset_id`. The body must be a JSON array.
    pub async fn fetch(
        &self,
        client: &ApiClient,
        token: &AccessToken,
        asset_id: &str,
    ) -> Result<Vec<Sensor>> {
        let url = client.endpoint(&sensor_path(asset_id));
        info!("Requesting sensors from: {}", url);

        let request = client
            .http()
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token.bearer());

        let sensors: Vec<Sensor> = client.send_json(request, "sensor list").await?;
        debug!(asset_id, sensors = sensors.len(), "Sensor list received");

        Ok(sensors)
    }
}
