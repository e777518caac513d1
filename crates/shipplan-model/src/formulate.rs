use shipplan_mip::{ConstraintOp, MipProblem};

use crate::matrix::CostMatrices;
use crate::modes::{LatenessEncoding, ModeTable, PlanConfig};

/// Turn the derived matrices into a solver-ready model.
///
/// Variables are laid out row-major: x[i,j] lives at index `i * modes + j`.
/// Three constraint families:
/// 1. exactly one mode per order (sum over modes = 1)
/// 2. per-mode capacity (sum over orders <= batch * capacity_fraction,
///    clamped to at least one order; the bound stays real-valued and
///    integrality of the variables floors it)
/// 3. the lateness cap, either by pinning over-cap pairs to zero or by
///    emitting one lateness * x <= cap row per pair with positive lateness
/// Effective per-mode capacity for a batch: batch size times the configured
/// fraction, with room for at least one order so tiny batches stay solvable.
/// The bound is real-valued; integrality of the variables floors it.
pub fn effective_capacity(n_orders: usize, config: &PlanConfig) -> f64 {
    (n_orders as f64 * config.capacity_fraction).max(1.0)
}

pub fn formulate(matrices: &CostMatrices, table: &ModeTable, config: &PlanConfig) -> MipProblem {
    let n_orders = matrices.num_orders();
    let n_modes = matrices.num_modes();

    let names = (0..n_orders)
        .flat_map(|i| {
            table
                .modes
                .iter()
                .map(move |params| format!("x_{}_{}", i, params.mode))
        })
        .collect();
    let mut problem = MipProblem::new(names);

    let mut coefficients = Vec::with_capacity(n_orders * n_modes);
    for i in 0..n_orders {
        for j in 0..n_modes {
            coefficients.push(matrices.immediate_cost[i][j] + matrices.late_penalty[i][j]);
        }
    }
    problem.set_objective(coefficients);

    for i in 0..n_orders {
        let row = (0..n_modes).map(|j| (i * n_modes + j, 1.0)).collect();
        problem.add_constraint(format!("order_{}_one_mode", i), row, ConstraintOp::Eq, 1.0);
    }

    let capacity = effective_capacity(n_orders, config);
    for (j, params) in table.modes.iter().enumerate() {
        let row = (0..n_orders).map(|i| (i * n_modes + j, 1.0)).collect();
        problem.add_constraint(
            format!("{}_capacity", params.mode),
            row,
            ConstraintOp::Le,
            capacity,
        );
    }

    match config.lateness_encoding {
        LatenessEncoding::Eliminate => {
            for i in 0..n_orders {
                for j in 0..n_modes {
                    if matrices.lateness[i][j] > config.lateness_cap_days {
                        problem.fix_zero(i * n_modes + j);
                    }
                }
            }
        }
        LatenessEncoding::PerPair => {
            for i in 0..n_orders {
                for (j, params) in table.modes.iter().enumerate() {
                    let late = matrices.lateness[i][j];
                    if late > 0 {
                        problem.add_constraint(
                            format!("order_{}_{}_lateness", i, params.mode),
                            vec![(i * n_modes + j, late as f64)],
                            ConstraintOp::Le,
                            config.lateness_cap_days as f64,
                        );
                    }
                }
            }
        }
    }

    problem
}
