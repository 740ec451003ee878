use hyperview_core::{display_value, Asset, AssetPage, AssetSensor, Result, Sensor};
use serde_json::{Map, Value};
use std::io::Write;

/// Sensor table columns and their widths.
pub const SENSOR_COLUMNS: [(&str, usize); 5] = [
    ("ID", 37),
    ("Name", 25),
    ("Last Value Update", 35),
    ("Value", 13),
    ("Unit", 10),
];

/// Asset summary columns and their widths.
pub const ASSET_COLUMNS: [(&str, usize); 3] = [("ID", 37), ("Asset Name", 25), ("Parent Name", 25)];

const ASSET_ID_WIDTH: usize = 37;

/// Sensors fetched for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReport {
    /// The asset, as listed.
    pub asset: Asset,
    /// Its sensors, in server order.
    pub sensors: Vec<Sensor>,
}

/// Everything a run prints.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// `_metadata` of the asset list response.
    pub metadata: Map<String, Value>,
    /// One entry per listed asset, in list order.
    pub assets: Vec<AssetReport>,
}

impl Report {
    /// Pairs each asset of `page` with its sensors. Both must be in the same order.
    pub fn new(page: AssetPage, sensors: Vec<Vec<Sensor>>) -> Self {
        let assets = page
            .data
            .into_iter()
            .zip(sensors)
            .map(|(asset, sensors)| AssetReport { asset, sensors })
            .collect();

        Self {
            metadata: page.metadata,
            assets,
        }
    }

    /// Total number of sensor rows.
    pub fn sensor_count(&self) -> usize {
        self.assets.iter().map(|a| a.sensors.len()).sum()
    }

    /// Writes metadata, the asset summary and one sensor table per asset.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        print_metadata(out, &self.metadata)?;
        let assets: Vec<&Asset> = self.assets.iter().map(|a| &a.asset).collect();
        print_asset_table(out, &assets)?;
        for entry in &self.assets {
            print_sensor_table(out, &entry.asset, &entry.sensors)?;
        }
        Ok(())
    }
}

/// Prints the asset list metadata as pretty JSON.
pub fn print_metadata<W: Write>(out: &mut W, metadata: &Map<String, Value>) -> Result<()> {
    let pretty = serde_json::to_string_pretty(metadata)?;
    writeln!(out, "Asset response metadata: {}", pretty)?;
    Ok(())
}

/// Prints the business-entity `data` array as pretty JSON.
pub fn print_business_entities<W: Write>(out: &mut W, entities: &[Value]) -> Result<()> {
    let pretty = serde_json::to_string_pretty(entities)?;
    writeln!(out, "{}", pretty)?;
    Ok(())
}

/// Prints id, name and parent name of every asset.
pub fn print_asset_table<W: Write>(out: &mut W, assets: &[&Asset]) -> Result<()> {
    let widths = ASSET_COLUMNS.map(|(_, w)| w);
    writeln!(out)?;
    writeln!(out, "Asset List")?;
    write_row(out, &widths, &ASSET_COLUMNS.map(|(title, _)| title.to_string()))?;
    write_rule(out, &widths)?;
    for asset in assets {
        write_row(
            out,
            &widths,
            &[
                asset.id.clone(),
                asset.name.clone().unwrap_or_default(),
                asset.field("parentName").map(display_value).unwrap_or_default(),
            ],
        )?;
    }
    Ok(())
}

/// Prints the header line of `asset` followed by its sensor table.
pub fn print_sensor_table<W: Write>(out: &mut W, asset: &Asset, sensors: &[Sensor]) -> Result<()> {
    let widths = SENSOR_COLUMNS.map(|(_, w)| w);
    writeln!(out)?;
    writeln!(
        out,
        "Asset {}: {}",
        asset.id,
        asset.name.as_deref().unwrap_or_default()
    )?;
    write_row(out, &widths, &SENSOR_COLUMNS.map(|(title, _)| title.to_string()))?;
    write_rule(out, &widths)?;
    for sensor in sensors {
        write_row(out, &widths, &sensor_cells(sensor))?;
    }
    Ok(())
}

/// Prints sensors of several assets in one table, asset id first.
pub fn print_asset_sensor_table<W: Write>(out: &mut W, rows: &[AssetSensor]) -> Result<()> {
    let mut widths = vec![ASSET_ID_WIDTH];
    widths.extend(SENSOR_COLUMNS.map(|(_, w)| w));

    let mut titles = vec!["Asset ID".to_string()];
    titles.extend(SENSOR_COLUMNS.map(|(title, _)| title.to_string()));

    writeln!(out)?;
    writeln!(out, "Sensors")?;
    write_row(out, &widths, &titles)?;
    write_rule(out, &widths)?;
    for row in rows {
        let mut cells = vec![row.asset_id.clone()];
        cells.extend(sensor_cells(&row.sensor));
        write_row(out, &widths, &cells)?;
    }
    Ok(())
}

fn sensor_cells(sensor: &Sensor) -> [String; 5] {
    [
        display_value(&sensor.id),
        display_value(&sensor.name),
        display_value(&sensor.last_value_update),
        display_value(&sensor.value),
        display_value(&sensor.unit_string),
    ]
}

/// Cells are padded, never truncated.
fn format_row(widths: &[usize], cells: &[String]) -> String {
    widths
        .iter()
        .zip(cells)
        .map(|(width, cell)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("|")
}

fn write_row<W: Write>(out: &mut W, widths: &[usize], cells: &[String]) -> Result<()> {
    writeln!(out, "{}", format_row(widths, cells))?;
    Ok(())
}

fn write_rule<W: Write>(out: &mut W, widths: &[usize]) -> Result<()> {
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("+");
    writeln!(out, "{}", rule)?;
    Ok(())
}
