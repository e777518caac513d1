use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use microlp::{ComparisonOp, OptimizationDirection, Problem};
use thiserror::Error;

use crate::problem::{ConstraintOp, MipProblem};
use crate::solution::MipSolution;

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("model is infeasible: no assignment satisfies all constraints")]
    Infeasible,
    #[error("model is unbounded")]
    Unbounded,
    #[error("solve did not finish within {0:?}")]
    LimitExceeded(Duration),
    #[error("solver backend error: {0}")]
    Backend(String),
}

/// Adapter around the MIP backend. The backend is treated as an opaque,
/// blocking call; the only knob it exposes here is a wall-clock budget.
pub struct Solver {
    /// Wall-clock budget for a single solve
    time_limit: Option<Duration>,
}

impl Default for Solver {
    fn default() -> Self {
        Self { time_limit: None }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Solve to optimality, or report infeasibility/limit exhaustion.
    ///
    /// With a time limit set, the backend runs on a worker thread and the
    /// result is awaited up to the deadline. The backend call itself cannot
    /// be interrupted, so on timeout the worker is left to finish and its
    /// result is discarded.
    pub fn solve(&self, problem: &MipProblem) -> Result<MipSolution, SolveError> {
        match self.time_limit {
            None => solve_once(problem),
            Some(limit) if limit.is_zero() => Err(SolveError::LimitExceeded(limit)),
            Some(limit) => {
                let (tx, rx) = mpsc::channel();
                let problem = problem.clone();
                thread::spawn(move || {
                    let _ = tx.send(solve_once(&problem));
                });
                await_result(&rx, limit)
            }
        }
    }
}

/// Wait for the worker's result. A closed channel means the worker died
/// without sending anything, which is a backend failure, not a timeout.
fn await_result(
    rx: &mpsc::Receiver<Result<MipSolution, SolveError>>,
    limit: Duration,
) -> Result<MipSolution, SolveError> {
    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(SolveError::LimitExceeded(limit)),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(SolveError::Backend(
            "solver thread exited without a result".to_string(),
        )),
    }
}

fn solve_once(problem: &MipProblem) -> Result<MipSolution, SolveError> {
    let mut backend = Problem::new(OptimizationDirection::Minimize);

    let vars: Vec<microlp::Variable> = (0..problem.num_variables())
        .map(|idx| {
            let cost = problem.objective.coefficients[idx];
            if problem.is_fixed_zero(idx) {
                backend.add_integer_var(cost, (0, 0))
            } else {
                backend.add_binary_var(cost)
            }
        })
        .collect();

    for constraint in &problem.constraints {
        let terms: Vec<(microlp::Variable, f64)> = constraint
            .terms
            .iter()
            .map(|&(idx, coeff)| (vars[idx], coeff))
            .collect();
        let op = match constraint.op {
            ConstraintOp::Le => ComparisonOp::Le,
            ConstraintOp::Ge => ComparisonOp::Ge,
            ConstraintOp::Eq => ComparisonOp::Eq,
        };
        backend.add_constraint(terms, op, constraint.rhs);
    }

    let solved = backend.solve().map_err(|e| match e {
        microlp::Error::Infeasible => SolveError::Infeasible,
        microlp::Error::Unbounded => SolveError::Unbounded,
        other => SolveError::Backend(other.to_string()),
    })?;

    let values = vars.iter().map(|&v| solved.var_value_rounded(v)).collect();
    Ok(MipSolution {
        values,
        objective_value: solved.objective(),
    })
}
