use dronefleet_structs::SolveStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Error, Debug, PartialEq)]
pub enum PlanError {
    /// Malformed or out-of-range input, detected before solving.
    #[error("invalid input in {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The solver terminated without an optimal solution.
    #[error("solver finished with status: {0}")]
    Solve(SolveStatus),
}

impl PlanError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> Option<SolveStatus> {
        match self {
            PlanError::Solve(status) => Some(*status),
            PlanError::InvalidInput { .. } => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        self.status() == Some(SolveStatus::Infeasible)
    }
}
