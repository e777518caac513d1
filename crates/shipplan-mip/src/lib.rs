mod problem;
mod solution;
mod solve;

pub use problem::{Constraint, ConstraintOp, MipProblem, Objective};
pub use solution::MipSolution;
pub use solve::{SolveError, Solver};
