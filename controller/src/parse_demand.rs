use std::io::Read;
use std::path::Path;

use anyhow::Context;
use dronefleet_structs::DemandPoint;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DemandRow {
    #[serde(rename = "Hospital Name")]
    name: String,
    #[serde(rename = "Daily Demand")]
    daily_demand: f64,
}

/// Reads the hospital demand table. Only the `Hospital Name` and
/// `Daily Demand` columns are used; row order is kept.
pub fn read_demand<R: Read>(reader: R) -> anyhow::Result<Vec<DemandPoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (i, row) in rdr.deserialize::<DemandRow>().enumerate() {
        // Row 1 is the header.
        let row = row.with_context(|| format!("demand table row {}", i + 2))?;
        points.push(DemandPoint::new(row.name, row.daily_demand));
    }
    Ok(points)
}

pub fn load_demand(path: &Path) -> anyhow::Result<Vec<DemandPoint>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening demand table {}", path.display()))?;
    read_demand(file).with_context(|| format!("reading demand table {}", path.display()))
}
