use shipplan_mip::MipSolution;

use crate::modes::{ModeTable, ShippingMode};
use crate::order::Order;
use crate::plan::PlanError;

/// The final mapping from each order to its selected mode.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// (order id, selected mode), in the same order as the input batch
    pub choices: Vec<(String, ShippingMode)>,
    /// Achieved objective value: total immediate cost plus late penalties
    pub total_cost: f64,
}

/// Read the solved decision variables back into an [`Assignment`].
///
/// The one-hot constraint guarantees exactly one selected mode per order in
/// any successful solve; a count other than one means the formulation or the
/// backend is broken, so it is checked rather than assumed.
pub fn extract_assignment(
    orders: &[Order],
    table: &ModeTable,
    solution: &MipSolution,
) -> Result<Assignment, PlanError> {
    let n_modes = table.len();
    let mut choices = Vec::with_capacity(orders.len());

    for (i, order) in orders.iter().enumerate() {
        let mut selected = (0..n_modes).filter(|j| solution.is_selected(i * n_modes + j));
        let j = selected.next();
        if j.is_none() || selected.next().is_some() {
            return Err(PlanError::InconsistentSolution {
                order: order.id.clone(),
            });
        }
        let j = j.unwrap();
        choices.push((order.id.clone(), table.modes[j].mode));
    }

    Ok(Assignment {
        choices,
        total_cost: solution.objective_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_orders() -> Vec<Order> {
        vec![
            Order::new("a", 10.0, 2, 100.0),
            Order::new("b", 20.0, 2, 100.0),
        ]
    }

    #[test]
    fn reads_one_mode_per_order_in_input_order() {
        let table = ModeTable::default();
        // a -> Same_Day (index 1), b -> Standard_Class (index 3)
        let solution = MipSolution {
            values: vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            objective_value: 3.2,
        };
        let assignment = extract_assignment(&two_orders(), &table, &solution).unwrap();
        assert_eq!(
            assignment.choices,
            vec![
                ("a".to_string(), ShippingMode::SameDay),
                ("b".to_string(), ShippingMode::StandardClass),
            ]
        );
        assert!((assignment.total_cost - 3.2).abs() < 1e-9);
    }

    #[test]
    fn rejects_order_with_no_selected_mode() {
        let table = ModeTable::default();
        let solution = MipSolution {
            values: vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            objective_value: 0.0,
        };
        let err = extract_assignment(&two_orders(), &table, &solution).unwrap_err();
        assert!(matches!(err, PlanError::InconsistentSolution { ref order } if order == "b"));
    }

    #[test]
    fn rejects_order_with_two_selected_modes() {
        let table = ModeTable::default();
        let solution = MipSolution {
            values: vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            objective_value: 0.0,
        };
        let err = extract_assignment(&two_orders(), &table, &solution).unwrap_err();
        assert!(matches!(err, PlanError::InconsistentSolution { ref order } if order == "a"));
    }

    #[test]
    fn tolerates_backend_float_noise() {
        let table = ModeTable::default();
        let solution = MipSolution {
            values: vec![0.0000001, 0.9999999, 0.0, 0.0],
            objective_value: 2.5,
        };
        let orders = vec![Order::new("a", 10.0, 2, 100.0)];
        let assignment = extract_assignment(&orders, &table, &solution).unwrap();
        assert_eq!(assignment.choices[0].1, ShippingMode::SameDay);
    }
}
