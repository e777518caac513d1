use std::time::Duration;

use shipplan_mip::{SolveError, Solver};
use thiserror::Error;

use crate::extract::{Assignment, extract_assignment};
use crate::formulate::formulate;
use crate::matrix::{ModelError, build_matrices};
use crate::modes::{ModeTable, PlanConfig};
use crate::order::Order;

#[derive(Error, Debug)]
pub enum PlanError {
    /// Malformed order or mode data, caught during matrix construction
    #[error(transparent)]
    InvalidInput(#[from] ModelError),
    /// The constraint families admit no assignment. Distinct from a
    /// successful zero-cost solve.
    #[error("no assignment satisfies all constraints")]
    Infeasible,
    /// The solver's time budget ran out before an optimum was proven
    #[error("solver budget of {0:?} exhausted")]
    LimitExceeded(Duration),
    /// The backend failed for some other reason
    #[error("solver error: {0}")]
    Solver(String),
    /// A solved batch where some order does not have exactly one selected
    /// mode. Always a defect in the formulation or the backend, never
    /// retried.
    #[error("order {order}: solution does not select exactly one mode")]
    InconsistentSolution { order: String },
}

/// Run the whole batch pipeline: matrices, model, solve, extraction.
///
/// One synchronous solve per call, no shared state; re-running with the same
/// inputs reproduces the same objective value.
pub fn plan(
    orders: &[Order],
    table: &ModeTable,
    config: &PlanConfig,
    solver: &Solver,
) -> Result<Assignment, PlanError> {
    let matrices = build_matrices(orders, table, config)?;
    let problem = formulate(&matrices, table, config);
    let solution = solver.solve(&problem).map_err(|e| match e {
        SolveError::Infeasible => PlanError::Infeasible,
        SolveError::LimitExceeded(limit) => PlanError::LimitExceeded(limit),
        other => PlanError::Solver(other.to_string()),
    })?;
    extract_assignment(orders, table, &solution)
}
