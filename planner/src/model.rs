use std::collections::HashSet;

use dronefleet_structs::{CapacityPolicy, DemandPoint, ModelParameters};
use log::{debug, info};

use crate::error::{PlanError, Result};
use crate::extsolvers::LPSolver;

/// Relative slack absorbing floating-point noise in coverage requirements,
/// e.g. `100 * 0.3`.
pub const REQUIREMENT_TOLERANCE: f64 = 1e-9;

/// Drones assigned to one demand point. Integer, at least `lower`, no upper bound.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentVariable {
    pub name: String,
    pub point_id: String,
    pub lower: f64,
    pub cost: f64,
}

/// `x[var] >= required`
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageConstraint {
    pub name: String,
    pub var: usize,
    pub required: f64,
}

/// `sum(x[vars]) <= fleet_size`
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityConstraint {
    pub name: String,
    pub vars: Vec<usize>,
    pub fleet_size: u32,
    /// Whether the constraint is given to the solver. Advisory caps are only
    /// checked against the solution.
    pub enforced: bool,
}

/// The fleet sizing MILP: minimize the total number of drones such that every
/// point is covered and (under a hard policy) the fleet cap holds.
#[derive(Debug, Clone)]
pub struct FleetModel {
    pub params: ModelParameters,
    pub vars: Vec<AssignmentVariable>,
    pub coverage: Vec<CoverageConstraint>,
    pub capacity: CapacityConstraint,
    /// Show solver console output.
    pub verbose: bool,
}

/// Real-valued number of drones a point needs so that its daily demand is
/// served within the maximum waiting time.
pub fn required_drones(daily_demand: f64, params: &ModelParameters) -> f64 {
    (daily_demand * params.cycle_time) / params.max_wait_time
}

fn snapped_requirement(required: f64) -> f64 {
    (required - REQUIREMENT_TOLERANCE * required.abs().max(1.0))
        .ceil()
        .max(0.0)
}

/// Smallest drone count satisfying a coverage requirement. Saturates at
/// `u32::MAX`; `validate` rejects demands that large.
pub fn min_drones(required: f64) -> u32 {
    snapped_requirement(required).min(u32::MAX as f64) as u32
}

pub fn validate(points: &[DemandPoint], params: &ModelParameters) -> Result<()> {
    if points.is_empty() {
        return Err(PlanError::invalid("points", "no demand points given"));
    }
    if !(params.cycle_time.is_finite() && params.cycle_time > 0.0) {
        return Err(PlanError::invalid(
            "cycle_time",
            format!("must be positive, got {}", params.cycle_time),
        ));
    }
    if !(params.max_wait_time.is_finite() && params.max_wait_time > 0.0) {
        return Err(PlanError::invalid(
            "max_wait_time",
            format!("must be positive, got {}", params.max_wait_time),
        ));
    }
    if let Some(t) = params.time_limit {
        if !(t > 0.0) {
            return Err(PlanError::invalid(
                "time_limit",
                format!("must be positive, got {}", t),
            ));
        }
    }

    let mut seen = HashSet::new();
    let mut total: u64 = 0;
    for (i, p) in points.iter().enumerate() {
        if p.id.trim().is_empty() {
            return Err(PlanError::invalid(format!("points[{}].id", i), "empty identifier"));
        }
        if !seen.insert(p.id.as_str()) {
            return Err(PlanError::invalid(
                format!("points[{}].id", i),
                format!("duplicate identifier {:?}", p.id),
            ));
        }
        if !(p.daily_demand.is_finite() && p.daily_demand >= 0.0) {
            return Err(PlanError::invalid(
                format!("points[{}].daily_demand", i),
                format!("must be a non-negative number, got {}", p.daily_demand),
            ));
        }

        let needed = snapped_requirement(required_drones(p.daily_demand, params));
        if needed > u32::MAX as f64 {
            return Err(PlanError::invalid(
                format!("points[{}].daily_demand", i),
                format!("needs {} drones, more than {} can be counted", needed, u32::MAX),
            ));
        }
        total += (needed as u64).max(1);
    }
    if total > u32::MAX as u64 {
        return Err(PlanError::invalid(
            "points",
            format!("all points together need {} drones, more than {} can be counted", total, u32::MAX),
        ));
    }
    Ok(())
}

pub fn build(points: &[DemandPoint], params: &ModelParameters) -> Result<FleetModel> {
    validate(points, params)?;

    let mut vars = Vec::with_capacity(points.len());
    let mut coverage = Vec::with_capacity(points.len());

    for (idx, point) in points.iter().enumerate() {
        vars.push(AssignmentVariable {
            name: format!("drones_assigned_{}", point.id),
            point_id: point.id.clone(),
            lower: 1.0,
            cost: 1.0,
        });

        let required = required_drones(point.daily_demand, params);
        debug!(
            "{}: demand {} needs {:.3} drones (min {})",
            point.id,
            point.daily_demand,
            required,
            min_drones(required)
        );
        coverage.push(CoverageConstraint {
            name: format!("demand_satisfaction_{}", point.id),
            var: idx,
            required,
        });
    }

    let capacity = CapacityConstraint {
        name: "fleet_availability".to_string(),
        vars: (0..vars.len()).collect(),
        fleet_size: params.fleet_size,
        enforced: params.capacity_policy == CapacityPolicy::Hard,
    };

    info!(
        "built fleet model: {} variables, {} coverage constraints, fleet cap {} ({:?})",
        vars.len(),
        coverage.len(),
        params.fleet_size,
        params.capacity_policy
    );

    Ok(FleetModel {
        params: params.clone(),
        vars,
        coverage,
        capacity,
        verbose: false,
    })
}

impl FleetModel {
    /// Lower bound on the total fleet any solution needs.
    pub fn min_total(&self) -> u64 {
        self.coverage
            .iter()
            .map(|c| min_drones(c.required).max(self.vars[c.var].lower as u32) as u64)
            .sum()
    }

    /// Creates a fresh solver instance holding this model.
    pub fn load<LP: LPSolver>(&self) -> (LP, Vec<LP::Var>) {
        #[cfg(feature = "prof")]
        let _p = hprof::enter("load model");

        let mut lp = LP::new();
        let inf = lp.inf();

        let lp_vars = self
            .vars
            .iter()
            .map(|v| {
                let var = lp.add_var(&v.name, v.cost);
                lp.set_integer(var);
                lp.set_bounds(var, v.lower, inf);
                var
            })
            .collect::<Vec<_>>();

        for c in self.coverage.iter() {
            let rhs = min_drones(c.required) as f64;
            lp.add_constraint(&c.name, rhs, inf, &[lp_vars[c.var]], &[1.0]);
        }

        if self.capacity.enforced {
            let idxs = self.capacity.vars.iter().map(|v| lp_vars[*v]).collect::<Vec<_>>();
            lp.add_constraint(
                &self.capacity.name,
                -inf,
                self.capacity.fleet_size as f64,
                &idxs,
                &vec![1.0; idxs.len()],
            );
        }

        if let Some(seconds) = self.params.time_limit {
            lp.set_time_limit(seconds);
        }
        if self.verbose {
            lp.set_verbose();
        }

        (lp, lp_vars)
    }
}

/// Writes the model in the solver's file format (chosen by the path's extension).
pub fn export_model<LP: LPSolver>(model: &FleetModel, path: &str) {
    let (mut lp, _) = model.load::<LP>();
    lp.write_model(path);
    info!("model saved to {}", path);
}
