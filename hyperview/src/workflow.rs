use crate::export;
use crate::report::{self, Report};
use hyperview_core::{
    AccessToken, AssetPage, AssetSensor, BusinessEntityPage, Credentials, Result, Sensor,
};
use hyperview_flow::{
    ApiClient, AssetLister, BusinessEntityLister, ClientCredentialsFlow, SensorFetcher,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a [`run`] printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of assets listed.
    pub assets: usize,
    /// Number of sensor rows printed.
    pub sensors: usize,
}

/// What a [`run_export`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of asset ids read from the input file.
    pub assets: usize,
    /// Number of sensor rows exported.
    pub sensors: usize,
    /// Where the CSV was written.
    pub output: PathBuf,
}

/// Exchanges the client credentials for a bearer token.
pub async fn authenticate(client: &ApiClient, credentials: &Credentials) -> Result<AccessToken> {
    ClientCredentialsFlow::from_credentials(credentials)
        .get_token(client)
        .await
}

/// Fetches the first page of CRAC assets.
pub async fn list_assets(client: &ApiClient, token: &AccessToken) -> Result<AssetPage> {
    AssetLister::new().list(client, token).await
}

/// Fetches the first 100 business entities.
pub async fn list_business_entities(
    client: &ApiClient,
    token: &AccessToken,
) -> Result<BusinessEntityPage> {
    BusinessEntityLister::new().list(client, token).await
}

/// Fetches the sensors of one asset. Quotes around `asset_id` are stripped.
pub async fn get_sensors(
    client: &ApiClient,
    token: &AccessToken,
    asset_id: &str,
) -> Result<Vec<Sensor>> {
    SensorFetcher::new().fetch(client, token, asset_id).await
}

/// Authenticates, lists assets and fetches the sensors of each one, in list order.
///
/// The first failure aborts the whole fetch.
pub async fn fetch_report(client: &ApiClient, credentials: &Credentials) -> Result<Report> {
    let token = authenticate(client, credentials).await?;
    let page = list_assets(client, &token).await?;

    let mut sensors = Vec::with_capacity(page.data.len());
    for asset in &page.data {
        debug!(
            "Asset ID: {}, Name: {}",
            asset.id,
            asset.name.as_deref().unwrap_or_default()
        );
        sensors.push(get_sensors(client, &token, &asset.id).await?);
    }

    Ok(Report::new(page, sensors))
}

/// Runs the full listing and prints the report to `out`.
///
/// Nothing is printed unless every request succeeded.
pub async fn run<W: Write>(
    client: &ApiClient,
    credentials: &Credentials,
    out: &mut W,
) -> Result<RunSummary> {
    let report = fetch_report(client, credentials).await?;
    report.write_to(out)?;

    let summary = RunSummary {
        assets: report.assets.len(),
        sensors: report.sensor_count(),
    };
    info!(assets = summary.assets, sensors = summary.sensors, "Run complete");
    Ok(summary)
}

/// Authenticates, lists business entities and prints their `data` to `out`.
///
/// Returns the number of entities printed.
pub async fn run_business_entities<W: Write>(
    client: &ApiClient,
    credentials: &Credentials,
    out: &mut W,
) -> Result<usize> {
    let token = authenticate(client, credentials).await?;
    let page = list_business_entities(client, &token).await?;

    report::print_business_entities(out, &page.data)?;
    info!(entities = page.data.len(), "Business entity listing complete");
    Ok(page.data.len())
}

/// Fetches sensors for each id in order, tagging every sensor with its asset id.
pub async fn collect_sensors(
    client: &ApiClient,
    token: &AccessToken,
    asset_ids: &[String],
) -> Result<Vec<AssetSensor>> {
    let mut rows = Vec::new();
    for asset_id in asset_ids {
        let sensors = get_sensors(client, token, asset_id).await?;
        rows.extend(sensors.into_iter().map(|sensor| AssetSensor {
            asset_id: asset_id.clone(),
            sensor,
        }));
    }
    Ok(rows)
}

/// Exports the sensors of the assets listed in `input` to `output`.
///
/// The input file is read before any request is made. The combined table is
/// printed to `out` once every fetch succeeded.
pub async fn run_export<W: Write>(
    client: &ApiClient,
    credentials: &Credentials,
    input: &Path,
    output: &Path,
    out: &mut W,
) -> Result<ExportSummary> {
    info!("Input filename: {}", input.display());
    let asset_ids = export::read_asset_ids_from_path(input)?;

    let token = authenticate(client, credentials).await?;
    let rows = collect_sensors(client, &token, &asset_ids).await?;

    report::print_asset_sensor_table(out, &rows)?;
    export::write_sensor_csv_file(output, &rows)?;
    writeln!(out, "Output file written to: {}", output.display())?;

    Ok(ExportSummary {
        assets: asset_ids.len(),
        sensors: rows.len(),
        output: output.to_path_buf(),
    })
}
