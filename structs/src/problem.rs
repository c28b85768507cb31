use serde::{Deserialize, Serialize};

use crate::DemandPoint;

/// How the fleet-availability constraint is treated.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// The fleet cap is a solver constraint; conflicting demand makes the model infeasible.
    #[default]
    Hard,
    /// The fleet cap is only checked after solving; the verdict carries the shortage.
    Advisory,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ModelParameters {
    pub fleet_size: u32,
    /// Hours.
    pub max_wait_time: f64,
    /// Hours per delivery round-trip.
    pub cycle_time: f64,
    #[serde(default)]
    pub capacity_policy: CapacityPolicy,
    /// Solver wall-clock limit in seconds.
    #[serde(default)]
    pub time_limit: Option<f64>,
}

impl ModelParameters {
    pub fn new(fleet_size: u32, max_wait_time: f64, cycle_time: f64) -> Self {
        Self {
            fleet_size,
            max_wait_time,
            cycle_time,
            capacity_policy: CapacityPolicy::Hard,
            time_limit: None,
        }
    }

    pub fn with_policy(self, capacity_policy: CapacityPolicy) -> Self {
        Self {
            capacity_policy,
            ..self
        }
    }
}

/// A complete planning instance, as stored in benchmark files.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct FleetProblem {
    pub params: ModelParameters,
    pub points: Vec<DemandPoint>,
}
