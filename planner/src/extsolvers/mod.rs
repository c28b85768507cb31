use dronefleet_structs::SolveStatus;

pub mod highs;
pub mod gurobi;

/// Names end up in exported model files, so they are restricted to
/// characters every LP/MPS reader accepts.
pub fn model_name(name :&str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// A mixed-integer solver instance. Variables are continuous on `[0, inf)` until
/// bounds or integrality are changed; all objectives are minimized.
pub trait LPSolver {
    type Var : Copy+Clone;
    fn new() -> Self;
    fn add_var(&mut self, name :&str, cost:f64 ) -> Self::Var;
    fn set_integer(&mut self, var :Self::Var);
    fn set_bounds(&mut self, var :Self::Var, lower :f64, upper :f64);
    fn add_constraint(&mut self, name :&str, lb :f64, ub :f64, idxs :&[Self::Var], coeffs :&[f64]);
    fn set_time_limit(&mut self, seconds :f64);
    fn set_verbose(&mut self);
    fn optimize(&mut self) -> SolveStatus;
    /// Variable values of the last solve, in order of creation.
    fn solution(&self) -> Vec<f64>;
    fn objective_value(&self) -> f64;
    fn inf(&self) -> f64;
    fn num_vars(&self) -> usize;
    fn write_model(&mut self, path :&str);
}
