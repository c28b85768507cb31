use std::path::{Path, PathBuf};

use anyhow::Context;
use dronefleet_structs::{CapacityPolicy, ModelParameters};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "dronefleet.json";

fn default_output_file() -> PathBuf {
    PathBuf::from("drone_assignment_results.csv")
}

fn default_fleet_size() -> u32 {
    75
}

fn default_max_wait_time() -> f64 {
    1.0
}

fn default_cycle_time() -> f64 {
    0.30
}

/// A single planning run, read from a JSON file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct RunConfig {
    pub demand_file: PathBuf,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    #[serde(default = "default_fleet_size")]
    pub fleet_size: u32,
    /// Hours.
    #[serde(default = "default_max_wait_time")]
    pub max_wait_time: f64,
    /// Hours per delivery round-trip.
    #[serde(default = "default_cycle_time")]
    pub cycle_time: f64,
    #[serde(default)]
    pub capacity_policy: CapacityPolicy,
    #[serde(default)]
    pub time_limit: Option<f64>,
    #[serde(default)]
    pub verbose: bool,
    /// Also write the model (`.lp` or `.mps`) here.
    #[serde(default)]
    pub model_file: Option<PathBuf>,
}

impl RunConfig {
    pub fn params(&self) -> ModelParameters {
        ModelParameters {
            fleet_size: self.fleet_size,
            max_wait_time: self.max_wait_time,
            cycle_time: self.cycle_time,
            capacity_policy: self.capacity_policy,
            time_limit: self.time_limit,
        }
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}
