#![cfg(feature = "highs")]

use std::ffi::{c_void, CStr, CString};

use dronefleet_structs::SolveStatus;
use highs_sys::*;
use log::{debug, warn};

use super::{model_name, LPSolver};

fn option_name(name: &'static str) -> &'static CStr {
    CStr::from_bytes_with_nul(name.as_bytes()).unwrap()
}

pub struct HighsSolverInstance {
    ptr: *mut c_void,
    num_cols: usize,
}

impl Drop for HighsSolverInstance {
    fn drop(&mut self) {
        unsafe {
            highs_sys::Highs_destroy(self.ptr);
        }
    }
}

impl Default for HighsSolverInstance {
    fn default() -> Self {
        <Self as LPSolver>::new()
    }
}

impl HighsSolverInstance {
    fn check(&self, retval: HighsInt, what: &str) {
        assert!(
            retval == STATUS_OK || retval == STATUS_WARNING,
            "HiGHS call {} failed with status {}",
            what,
            retval
        );
    }

    fn warn_on_error(&self, retval: HighsInt, what: &str) {
        if retval != STATUS_OK {
            warn!("HiGHS call {} returned status {}", what, retval);
        }
    }
}

impl LPSolver for HighsSolverInstance {
    type Var = HighsInt;

    fn new() -> Self {
        let ptr = unsafe { highs_sys::Highs_create() };
        unsafe {
            highs_sys::Highs_setStringOptionValue(
                ptr,
                option_name("presolve\0").as_ptr(),
                option_name("on\0").as_ptr(),
            )
        };
        unsafe {
            highs_sys::Highs_setBoolOptionValue(ptr, option_name("output_flag\0").as_ptr(), 0)
        };
        Self { ptr, num_cols: 0 }
    }

    fn add_var(&mut self, name: &str, cost: f64) -> Self::Var {
        let new_col_idx = unsafe { highs_sys::Highs_getNumCol(self.ptr) };
        let inf = self.inf();
        let retval = unsafe {
            highs_sys::Highs_addCol(
                self.ptr,
                cost,
                0.0,
                inf,
                0,
                std::ptr::null(),
                std::ptr::null(),
            )
        };
        self.check(retval, "addCol");
        self.num_cols += 1;
        if let Ok(name) = CString::new(model_name(name)) {
            let retval = unsafe { highs_sys::Highs_passColName(self.ptr, new_col_idx, name.as_ptr()) };
            self.warn_on_error(retval, "passColName");
        }
        new_col_idx
    }

    fn set_integer(&mut self, var: Self::Var) {
        let retval = unsafe {
            highs_sys::Highs_changeColIntegrality(self.ptr, var, highs_sys::kHighsVarTypeInteger)
        };
        self.check(retval, "changeColIntegrality");
    }

    fn set_bounds(&mut self, var: Self::Var, lower: f64, upper: f64) {
        let retval = unsafe { highs_sys::Highs_changeColBounds(self.ptr, var, lower, upper) };
        self.check(retval, "changeColBounds");
    }

    fn add_constraint(&mut self, name: &str, lb: f64, ub: f64, idxs: &[Self::Var], coeffs: &[f64]) {
        assert!(idxs.len() == coeffs.len());
        let new_row_idx = unsafe { highs_sys::Highs_getNumRow(self.ptr) };
        let retval = unsafe {
            highs_sys::Highs_addRow(
                self.ptr,
                lb,
                ub,
                idxs.len() as HighsInt,
                idxs.as_ptr(),
                coeffs.as_ptr(),
            )
        };
        self.check(retval, "addRow");
        if let Ok(name) = CString::new(model_name(name)) {
            let retval = unsafe { highs_sys::Highs_passRowName(self.ptr, new_row_idx, name.as_ptr()) };
            self.warn_on_error(retval, "passRowName");
        }
    }

    fn set_time_limit(&mut self, seconds: f64) {
        let retval = unsafe {
            highs_sys::Highs_setDoubleOptionValue(
                self.ptr,
                option_name("time_limit\0").as_ptr(),
                seconds,
            )
        };
        self.check(retval, "setDoubleOptionValue(time_limit)");
    }

    fn set_verbose(&mut self) {
        unsafe {
            highs_sys::Highs_setBoolOptionValue(self.ptr, option_name("output_flag\0").as_ptr(), 1)
        };
    }

    fn optimize(&mut self) -> SolveStatus {
        let retval = unsafe { highs_sys::Highs_run(self.ptr) };
        self.warn_on_error(retval, "run");
        let model_status = unsafe { highs_sys::Highs_getModelStatus(self.ptr) };
        debug!("HiGHS model status {}", model_status);

        match model_status {
            MODEL_STATUS_OPTIMAL => SolveStatus::Optimal,
            // Our objectives are bounded below, so this can only be infeasibility.
            MODEL_STATUS_INFEASIBLE | MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE => {
                SolveStatus::Infeasible
            }
            MODEL_STATUS_UNBOUNDED => SolveStatus::Unbounded,
            other => {
                warn!("HiGHS stopped without an optimum (model status {})", other);
                SolveStatus::NotSolved
            }
        }
    }

    fn solution(&self) -> Vec<f64> {
        let mut var_value_out = vec![0.0; self.num_cols];
        if !var_value_out.is_empty() {
            let null = std::ptr::null_mut();
            unsafe {
                highs_sys::Highs_getSolution(self.ptr, var_value_out.as_mut_ptr(), null, null, null)
            };
        }
        var_value_out
    }

    fn objective_value(&self) -> f64 {
        unsafe { highs_sys::Highs_getObjectiveValue(self.ptr) }
    }

    fn inf(&self) -> f64 {
        unsafe { highs_sys::Highs_getInfinity(self.ptr) }
    }

    fn num_vars(&self) -> usize {
        self.num_cols
    }

    fn write_model(&mut self, path: &str) {
        let Ok(filename) = CString::new(path) else {
            warn!("cannot write model to {:?}", path);
            return;
        };
        let retval = unsafe { highs_sys::Highs_writeModel(self.ptr, filename.as_ptr()) };
        self.warn_on_error(retval, "writeModel");
    }
}
