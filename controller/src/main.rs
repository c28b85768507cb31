use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use dronefleet_planner::{build, export_model, solve, DefaultSolver, PlanError};
use dronefleet_structs::{FeasibilityVerdict, SolveStatus};
use log::{error, info};

pub mod config;
pub mod parse_demand;
pub mod report;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

const EXIT_SUFFICIENT: u8 = 0;
const EXIT_NOT_SOLVED: u8 = 2;
const EXIT_SHORTAGE: u8 = 3;

/// Exit code for a run that reached a verdict.
fn verdict_exit_code(verdict: &FeasibilityVerdict) -> u8 {
    if verdict.sufficient {
        EXIT_SUFFICIENT
    } else {
        EXIT_SHORTAGE
    }
}

/// Exit code for a plan that could not be produced, or `None` when the
/// error is not a solver verdict and should fail the run.
fn error_exit_code(err: &PlanError) -> Option<u8> {
    err.status().map(|_| EXIT_NOT_SOLVED)
}

fn hint(status: SolveStatus) -> &'static str {
    match status {
        SolveStatus::Infeasible => "coverage needs more drones than the fleet has; raise fleet_size or relax max_wait_time",
        SolveStatus::Unbounded => "the model is unbounded; check the input parameters",
        SolveStatus::NotSolved => "the solver gave up; raise time_limit or re-run",
        SolveStatus::Optimal => "",
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
    let config = config::load_config(&config_path)?;
    let params = config.params();

    let points = parse_demand::load_demand(&config.demand_file)?;
    info!("demand data ({} hospitals):", points.len());
    for p in points.iter() {
        info!("  {}: {}", p.id, p.daily_demand);
    }

    let mut model = build(&points, &params).context("building fleet model")?;
    model.verbose = config.verbose;
    if let Some(model_file) = config.model_file.as_ref() {
        export_model::<DefaultSolver>(&model, &model_file.to_string_lossy());
    }

    let plan = match solve::<DefaultSolver>(&model) {
        Ok(plan) => plan,
        Err(e) => match (e.status(), error_exit_code(&e)) {
            (Some(status), Some(code)) => {
                println!("Solver Status: {}", status);
                println!("{}", hint(status));
                return Ok(ExitCode::from(code));
            }
            _ => return Err(e).context("solving fleet model"),
        },
    };

    println!("Solver Status: {}", SolveStatus::Optimal);
    println!();
    print!("{}", report::render_table(&plan)?);
    println!();
    println!("{}", plan.verdict.message);
    println!();

    report::write_report(&config.output_file, &plan, &params)?;
    println!("Results saved to {}", config.output_file.display());

    Ok(ExitCode::from(verdict_exit_code(&plan.verdict)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronefleet_planner::verdict;

    #[test]
    fn sufficient_fleet_exits_zero() {
        assert_eq!(verdict_exit_code(&verdict(48, 75)), 0);
        assert_eq!(verdict_exit_code(&verdict(48, 48)), 0);
    }

    #[test]
    fn advisory_shortage_exits_three() {
        let v = verdict(48, 40);
        assert!(!v.sufficient);
        assert_eq!(verdict_exit_code(&v), 3);
    }

    #[test]
    fn every_solver_failure_exits_two() {
        for status in [SolveStatus::Infeasible, SolveStatus::Unbounded, SolveStatus::NotSolved] {
            assert_eq!(error_exit_code(&PlanError::Solve(status)), Some(2));
        }
        let invalid = PlanError::InvalidInput {
            field: "cycle_time".to_string(),
            reason: "must be positive, got 0".to_string(),
        };
        assert_eq!(error_exit_code(&invalid), None);
    }

    #[test]
    fn hints_name_a_remedy_per_status() {
        assert!(hint(SolveStatus::Infeasible).contains("fleet_size"));
        assert!(hint(SolveStatus::Unbounded).contains("unbounded"));
        assert!(hint(SolveStatus::NotSolved).contains("time_limit"));
        assert_eq!(hint(SolveStatus::Optimal), "");
        let hints = [
            hint(SolveStatus::Infeasible),
            hint(SolveStatus::Unbounded),
            hint(SolveStatus::NotSolved),
        ];
        assert!(hints[0] != hints[1] && hints[1] != hints[2] && hints[0] != hints[2]);
    }
}
