#[cfg(all(test, feature = "highs"))]
mod tests {

use dronefleet_structs::{round2, CapacityPolicy, DemandPoint, FleetProblem, ModelParameters, SolveStatus};

use crate::extsolvers::highs::HighsSolverInstance;
use crate::model::{build, export_model, min_drones, required_drones};
use crate::{plan_fleet, solve, PlanError};

fn hospitals(demands: &[f64]) -> Vec<DemandPoint> {
    demands
        .iter()
        .enumerate()
        .map(|(i, d)| DemandPoint::new(format!("hospital_{}", i), *d))
        .collect()
}

fn read_problem(path: &str) -> FleetProblem {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn check_properties(points: &[DemandPoint], params: &ModelParameters) {
    let plan = plan_fleet(points, params).unwrap();
    assert_eq!(plan.records.len(), points.len());
    for (point, record) in points.iter().zip(plan.records.iter()) {
        assert_eq!(record.id, point.id);
        assert!(record.assigned_drones >= 1);
        assert!(record.assigned_drones >= min_drones(required_drones(point.daily_demand, params)));
        assert_eq!(
            record.deliveries_per_hour,
            round2(record.assigned_drones as f64 / params.cycle_time)
        );
    }
    let total: u32 = plan.assigned().iter().sum();
    assert_eq!(plan.verdict.total_assigned, total);
    assert_eq!(plan.objective.round() as u32, total);
    if params.capacity_policy == CapacityPolicy::Hard {
        assert!(total <= params.fleet_size);
        assert!(plan.verdict.sufficient);
    }
}

#[test]
pub fn test_three_hospitals_sufficient() {
    let _ = env_logger::try_init();
    let plan = plan_fleet(&hospitals(&[100.0, 50.0, 10.0]), &ModelParameters::new(75, 1.0, 0.3)).unwrap();
    plan.print();
    assert_eq!(plan.assigned(), vec![30, 15, 3]);
    assert_eq!(plan.verdict.total_assigned, 48);
    assert!(plan.verdict.sufficient);
    assert_eq!(plan.verdict.deficit, 0);
    assert_eq!(plan.verdict.message, "Fleet sufficient! Total drones assigned: 48/75");
    assert_eq!(
        plan.records.iter().map(|r| r.deliveries_per_hour).collect::<Vec<_>>(),
        vec![100.0, 50.0, 10.0]
    );
}

#[test]
pub fn test_three_hospitals_infeasible() {
    let _ = env_logger::try_init();
    let err = plan_fleet(&hospitals(&[100.0, 50.0, 10.0]), &ModelParameters::new(40, 1.0, 0.3)).unwrap_err();
    assert_eq!(err, PlanError::Solve(SolveStatus::Infeasible));
    assert!(err.is_infeasible());
}

#[test]
pub fn test_three_hospitals_advisory_shortage() {
    let _ = env_logger::try_init();
    let params = ModelParameters::new(40, 1.0, 0.3).with_policy(CapacityPolicy::Advisory);
    let plan = plan_fleet(&hospitals(&[100.0, 50.0, 10.0]), &params).unwrap();
    assert_eq!(plan.assigned(), vec![30, 15, 3]);
    assert!(!plan.verdict.sufficient);
    assert_eq!(plan.verdict.deficit, 8);
    assert_eq!(plan.verdict.message, "Shortage: 8 more drones needed (Total: 48)");
}

#[test]
pub fn test_fleet_exactly_at_minimum() {
    let _ = env_logger::try_init();
    let plan = plan_fleet(&hospitals(&[100.0, 50.0, 10.0]), &ModelParameters::new(48, 1.0, 0.3)).unwrap();
    assert_eq!(plan.verdict.total_assigned, 48);
    assert!(plan.verdict.sufficient);

    let err = plan_fleet(&hospitals(&[100.0, 50.0, 10.0]), &ModelParameters::new(47, 1.0, 0.3)).unwrap_err();
    assert!(err.is_infeasible());
}

#[test]
pub fn test_zero_demand_gets_one_drone() {
    let _ = env_logger::try_init();
    let plan = plan_fleet(&hospitals(&[0.0, 0.0]), &ModelParameters::new(5, 1.0, 0.3)).unwrap();
    assert_eq!(plan.assigned(), vec![1, 1]);
    assert_eq!(plan.records[0].deliveries_per_hour, 3.33);
}

#[test]
pub fn test_zero_fleet_is_infeasible() {
    let _ = env_logger::try_init();
    let err = plan_fleet(&hospitals(&[0.0]), &ModelParameters::new(0, 1.0, 0.3)).unwrap_err();
    assert!(err.is_infeasible());
}

#[test]
pub fn test_fractional_requirements_round_up() {
    let _ = env_logger::try_init();
    // 7 * 0.25 / 0.5 = 3.5 and 3 * 0.25 / 0.5 = 1.5
    let plan = plan_fleet(&hospitals(&[7.0, 3.0]), &ModelParameters::new(10, 0.5, 0.25)).unwrap();
    assert_eq!(plan.assigned(), vec![4, 2]);
    assert_eq!(plan.records[0].deliveries_per_hour, 16.0);
}

#[test]
pub fn test_properties_on_bench_instances() {
    let _ = env_logger::try_init();
    for path in ["../bench/cairo_giza_small.json", "../bench/cairo_giza_full.json"] {
        let problem = read_problem(path);
        check_properties(&problem.points, &problem.params);
        let advisory = problem.params.clone().with_policy(CapacityPolicy::Advisory);
        check_properties(&problem.points, &advisory);
    }
}

#[test]
pub fn test_tight_bench_instance() {
    let _ = env_logger::try_init();
    let problem = read_problem("../bench/cairo_giza_tight.json");
    let err = plan_fleet(&problem.points, &problem.params).unwrap_err();
    assert_eq!(err.status(), Some(SolveStatus::Infeasible));
}

#[test]
pub fn test_monotone_in_demand() {
    let _ = env_logger::try_init();
    let params = ModelParameters::new(200, 1.0, 0.3);
    let mut demands = vec![0.0, 40.0, 25.0];
    let mut last = 0;
    for d in [0.0, 1.0, 3.0, 3.4, 10.0, 33.3, 34.0, 100.0, 250.0] {
        demands[0] = d;
        let plan = plan_fleet(&hospitals(&demands), &params).unwrap();
        let assigned = plan.records[0].assigned_drones;
        assert!(assigned >= last, "demand {} gave {} < {}", d, assigned, last);
        last = assigned;
    }
}

#[test]
pub fn test_solve_twice_is_identical() {
    let _ = env_logger::try_init();
    let problem = read_problem("../bench/cairo_giza_full.json");
    let model = build(&problem.points, &problem.params).unwrap();
    let first = solve::<HighsSolverInstance>(&model).unwrap();
    let second = solve::<HighsSolverInstance>(&model).unwrap();
    assert_eq!(first.records, second.records);
    assert_eq!(first.verdict, second.verdict);
}

#[test]
pub fn test_time_limit_still_optimal() {
    let _ = env_logger::try_init();
    let mut params = ModelParameters::new(75, 1.0, 0.3);
    params.time_limit = Some(10.0);
    let plan = plan_fleet(&hospitals(&[100.0, 50.0, 10.0]), &params).unwrap();
    assert_eq!(plan.verdict.total_assigned, 48);
}

#[test]
pub fn test_invalid_input_is_not_solved() {
    let err = plan_fleet(&hospitals(&[1.0]), &ModelParameters::new(5, 1.0, 0.0)).unwrap_err();
    assert_eq!(err.status(), None);
    assert!(matches!(err, PlanError::InvalidInput { .. }));
}

#[test]
pub fn test_export_model() {
    let _ = env_logger::try_init();
    let model = build(&hospitals(&[100.0, 50.0, 10.0]), &ModelParameters::new(75, 1.0, 0.3)).unwrap();
    let path = std::env::temp_dir().join("dronefleet_export_test.lp");
    let path = path.to_string_lossy().to_string();
    export_model::<HighsSolverInstance>(&model, &path);
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(!written.is_empty());
    assert!(written.contains("drones_assigned_hospital_0"));
    assert!(written.contains("demand_satisfaction_hospital_2"));
    assert!(written.contains("fleet_availability"));
}
}
