use serde::{Deserialize, Serialize};

use crate::report::{FeasibilityVerdict, ResultRecord};

/// Output of a successful (optimal) solve.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct FleetPlan {
    pub records: Vec<ResultRecord>,
    pub verdict: FeasibilityVerdict,
    pub objective: f64,
}

impl FleetPlan {
    pub fn print(&self) {
        for r in self.records.iter() {
            println!(
                "{}: {} drones, {:.2} deliveries/h",
                r.id, r.assigned_drones, r.deliveries_per_hour
            );
        }
        println!("{}", self.verdict.message);
    }

    pub fn assigned(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.assigned_drones).collect()
    }

    pub fn record(&self, id: &str) -> Option<&ResultRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}
