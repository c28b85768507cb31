#![cfg(feature = "gurobi")]

use core::f64;
use std::cell::RefCell;

use super::{model_name, LPSolver};
use dronefleet_structs::SolveStatus;
use grb::{expr::LinExpr, prelude::*};
use log::warn;

thread_local! {
static GLOBAL_GUROBI_ENV :RefCell<Option<grb::Env>> = const { RefCell::new(None) };
}

pub struct GurobiSolver {
    grb: grb::Model,
    added_vars: Vec<grb::Var>,
}

impl LPSolver for GurobiSolver {
    type Var = grb::Var;

    fn new() -> Self {
        let mut grb = GLOBAL_GUROBI_ENV.with_borrow_mut(|e| {
            if e.is_none() {
                *e = Some(grb::Env::new("").unwrap());
            }
            let env = e.as_ref().unwrap();
            grb::Model::with_env("", env).unwrap()
        });
        grb.set_param(grb::param::OutputFlag, 0).unwrap();
        Self {
            grb,
            added_vars: Vec::new(),
        }
    }

    fn add_var(&mut self, name: &str, cost: f64) -> Self::Var {
        let model = &mut self.grb;
        let name = model_name(name);
        let var = add_ctsvar!(model, name: &name, obj: cost, bounds: 0.0..).unwrap();
        self.added_vars.push(var);
        var
    }

    fn set_integer(&mut self, var: Self::Var) {
        self.grb
            .set_obj_attr(grb::attr::VType, &var, VarType::Integer)
            .unwrap();
    }

    fn set_bounds(&mut self, var: Self::Var, lower: f64, upper: f64) {
        self.grb.update().unwrap();
        self.grb.set_obj_attr(grb::attr::LB, &var, lower).unwrap();
        self.grb.set_obj_attr(grb::attr::UB, &var, upper).unwrap();
    }

    fn add_constraint(&mut self, name: &str, lb: f64, ub: f64, idxs: &[Self::Var], coeffs: &[f64]) {
        let name = model_name(name);
        let mut expr = LinExpr::new();
        for (v, c) in idxs.iter().zip(coeffs.iter()) {
            expr.add_term(*c, *v);
        }
        if lb == ub {
            self.grb.add_constr(&name, c!(expr == lb)).unwrap();
        } else if lb == -self.inf() {
            assert!(ub != self.inf());
            self.grb.add_constr(&name, c!(expr <= ub)).unwrap();
        } else if ub == self.inf() {
            assert!(lb != -self.inf());
            self.grb.add_constr(&name, c!(expr >= lb)).unwrap();
        } else {
            panic!("range constraints not supported");
        }
    }

    fn set_time_limit(&mut self, seconds: f64) {
        self.grb.set_param(grb::param::TimeLimit, seconds).unwrap();
    }

    fn set_verbose(&mut self) {
        self.grb.set_param(grb::param::OutputFlag, 1).unwrap();
    }

    fn optimize(&mut self) -> SolveStatus {
        if let Err(e) = self.grb.optimize() {
            warn!("gurobi optimize failed: {}", e);
            return SolveStatus::NotSolved;
        }
        match self.grb.status() {
            Ok(Status::Optimal) => SolveStatus::Optimal,
            Ok(Status::Infeasible) | Ok(Status::InfOrUnbd) => SolveStatus::Infeasible,
            Ok(Status::Unbounded) => SolveStatus::Unbounded,
            other => {
                warn!("gurobi stopped without an optimum: {:?}", other);
                SolveStatus::NotSolved
            }
        }
    }

    fn solution(&self) -> Vec<f64> {
        self.grb
            .get_obj_attr_batch(grb::attr::X, self.added_vars.iter().cloned())
            .unwrap()
    }

    fn objective_value(&self) -> f64 {
        self.grb.get_attr(attr::ObjVal).unwrap()
    }

    fn inf(&self) -> f64 {
        f64::INFINITY
    }

    fn num_vars(&self) -> usize {
        self.added_vars.len()
    }

    fn write_model(&mut self, path: &str) {
        if let Err(e) = self.grb.write(path) {
            warn!("gurobi failed to write model to {}: {}", path, e);
        }
    }
}
