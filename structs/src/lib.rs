use serde::{Deserialize, Serialize};

pub mod plan;
pub mod problem;
pub mod report;

pub use plan::FleetPlan;
pub use problem::{CapacityPolicy, FleetProblem, ModelParameters};
pub use report::{FeasibilityVerdict, ResultRecord, SolveStatus};

/// A facility that needs drone-delivered throughput, e.g. a hospital.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct DemandPoint {
    pub id: String,
    /// Deliveries required per day.
    pub daily_demand: f64,
}

impl DemandPoint {
    pub fn new(id: impl Into<String>, daily_demand: f64) -> Self {
        Self {
            id: id.into(),
            daily_demand,
        }
    }
}

/// Rounds to two decimals, the precision used for every reported rate.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(100.00000000000001), 100.0);
        assert_eq!(round2(1.0 / 0.3), 3.33);
        assert_eq!(round2(2.0 / 0.3), 6.67);
    }

    #[test]
    fn demand_point_from_json() {
        let p: DemandPoint =
            serde_json::from_str(r#"{"id": "Kasr Al Ainy", "daily_demand": 120}"#).unwrap();
        assert_eq!(p, DemandPoint::new("Kasr Al Ainy", 120.0));
    }
}
