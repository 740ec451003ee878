use chrono::{DateTime, Local};
use hyperview_core::{display_value, AssetSensor, HyperviewError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Column of the input file holding asset ids.
pub const ASSET_ID_COLUMN: &str = "AssetId";

/// Header row of the exported file.
pub const EXPORT_HEADER: [&str; 6] = ["assetId", "sensorId", "name", "timestamp", "value", "unit"];

fn csv_error(err: csv::Error) -> HyperviewError {
    HyperviewError::Csv(err.to_string())
}

/// Reads asset ids from the `AssetId` column, in file order. Blank cells are skipped.
///
/// Rows may have more or fewer fields than the header; rows too short to
/// reach the `AssetId` column are skipped.
pub fn read_asset_ids<R: Read>(input: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let column = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|h| h.trim() == ASSET_ID_COLUMN)
        .ok_or_else(|| {
            HyperviewError::Csv(format!("Input has no {} column", ASSET_ID_COLUMN))
        })?;

    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        match record.get(column).map(str::trim) {
            Some(id) if !id.is_empty() => ids.push(id.to_string()),
            _ => {}
        }
    }
    Ok(ids)
}

/// Opens `path` and reads its asset ids.
pub fn read_asset_ids_from_path(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| {
        HyperviewError::Csv(format!("Could not open {}: {}", path.display(), e))
    })?;
    read_asset_ids(file)
}

/// Writes one CSV row per sensor under [`EXPORT_HEADER`].
pub fn write_sensor_csv<W: Write>(output: W, rows: &[AssetSensor]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(EXPORT_HEADER).map_err(csv_error)?;

    for row in rows {
        let sensor = &row.sensor;
        writer
            .write_record([
                row.asset_id.clone(),
                display_value(&sensor.id),
                display_value(&sensor.name),
                display_value(&sensor.last_value_update),
                display_value(&sensor.value),
                display_value(&sensor.unit_string),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates `path` and writes the export into it.
pub fn write_sensor_csv_file(path: &Path, rows: &[AssetSensor]) -> Result<()> {
    let file = File::create(path)?;
    write_sensor_csv(file, rows)
}

/// `output_<YYYYmmdd_HHMMSS>.csv` for the given instant.
pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("output_{}.csv", now.format("%Y%m%d_%H%M%S")))
}
