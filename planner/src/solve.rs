use dronefleet_structs::{round2, FeasibilityVerdict, FleetPlan, ResultRecord, SolveStatus};
use log::{info, warn};

use crate::error::{PlanError, Result};
use crate::extsolvers::LPSolver;
use crate::model::FleetModel;

/// Solves the model with a fresh solver instance and reports the assignment.
/// Anything but an optimal solve is returned as `PlanError::Solve`.
pub fn solve<LP: LPSolver>(model: &FleetModel) -> Result<FleetPlan> {
    let (mut lp, lp_vars) = model.load::<LP>();
    assert!(lp.num_vars() == model.vars.len() && lp_vars.len() == model.vars.len());

    let status = {
        #[cfg(feature = "prof")]
        let _p = hprof::enter("fleet optimize");
        lp.optimize()
    };
    info!("solver status: {}", status);

    if status != SolveStatus::Optimal {
        warn!(
            "no fleet assignment ({}); coverage needs at least {} drones, fleet has {}",
            status,
            model.min_total(),
            model.params.fleet_size
        );
        return Err(PlanError::Solve(status));
    }

    // Solver variables are created in model order.
    let values = lp.solution();
    let cycle_time = model.params.cycle_time;
    let mut records = Vec::with_capacity(model.vars.len());
    let mut total_assigned: u32 = 0;
    for (var, value) in model.vars.iter().zip(values.iter()) {
        let rounded = value.round();
        if !(rounded >= 0.0 && rounded <= u32::MAX as f64) {
            warn!("solver returned unusable value {} for {}", value, var.name);
            return Err(PlanError::Solve(SolveStatus::NotSolved));
        }
        let assigned_drones = rounded as u32;
        let Some(total) = total_assigned.checked_add(assigned_drones) else {
            warn!("total assignment does not fit in {} drones", u32::MAX);
            return Err(PlanError::Solve(SolveStatus::NotSolved));
        };
        total_assigned = total;
        records.push(ResultRecord {
            id: var.point_id.clone(),
            assigned_drones,
            deliveries_per_hour: round2(assigned_drones as f64 / cycle_time),
        });
    }

    let verdict = verdict(total_assigned, model.params.fleet_size);
    if verdict.sufficient {
        info!("{}", verdict.message);
    } else {
        warn!("{}", verdict.message);
    }

    Ok(FleetPlan {
        records,
        verdict,
        objective: lp.objective_value(),
    })
}

/// Compares the assigned total against the fleet.
pub fn verdict(total_assigned: u32, fleet_size: u32) -> FeasibilityVerdict {
    if total_assigned > fleet_size {
        let deficit = total_assigned - fleet_size;
        FeasibilityVerdict {
            total_assigned,
            fleet_size,
            sufficient: false,
            deficit,
            message: format!(
                "Shortage: {} more drones needed (Total: {})",
                deficit, total_assigned
            ),
        }
    } else {
        FeasibilityVerdict {
            total_assigned,
            fleet_size,
            sufficient: true,
            deficit: 0,
            message: format!(
                "Fleet sufficient! Total drones assigned: {}/{}",
                total_assigned, fleet_size
            ),
        }
    }
}
