#[cfg(feature = "highs")]
use dronefleet_structs::{DemandPoint, FleetPlan, ModelParameters};

pub mod error;
pub mod extsolvers;
pub mod model;
pub mod solve;

mod fleet_tests;

pub use error::PlanError;
pub use model::{build, export_model, FleetModel};
pub use solve::{solve, verdict};

#[cfg(feature = "highs")]
pub type DefaultSolver = extsolvers::highs::HighsSolverInstance;

/// Builds and solves the fleet sizing model with the HiGHS backend.
#[cfg(feature = "highs")]
pub fn plan_fleet(points: &[DemandPoint], params: &ModelParameters) -> error::Result<FleetPlan> {
    let model = build(points, params)?;
    solve::<DefaultSolver>(&model)
}
