use serde::{Deserialize, Serialize};

/// Terminal state of a solver run.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Solver error, time limit or any other stop without a proven optimum.
    NotSolved,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::NotSolved => "Not Solved",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ResultRecord {
    pub id: String,
    pub assigned_drones: u32,
    pub deliveries_per_hour: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct FeasibilityVerdict {
    pub total_assigned: u32,
    pub fleet_size: u32,
    pub sufficient: bool,
    /// Drones missing from the fleet; zero when sufficient.
    pub deficit: u32,
    pub message: String,
}
