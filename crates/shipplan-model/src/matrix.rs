use thiserror::Error;

use crate::modes::{ModeTable, PlanConfig};
use crate::order::Order;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("mode table is empty")]
    EmptyModeTable,
    #[error("order batch is empty")]
    EmptyBatch,
    #[error("order {0}: negative price {1}")]
    NegativePrice(String, f64),
    #[error("order {0}: negative distance {1}")]
    NegativeDistance(String, f64),
    #[error("order {0}: negative scheduled days {1}")]
    NegativeScheduledDays(String, i64),
    #[error("order {0}: {1} is not finite")]
    NonFiniteValue(String, &'static str),
    #[error("mode {0}: speed and cost rate must be positive")]
    InvalidModeParams(String),
}

/// The four derived per-(order, mode) tables, all indexed `[order][mode]`
/// with the same row/column order as the inputs. Pure functions of the batch
/// and the parameter table; nothing here is recomputed during the solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrices {
    /// price[i] * cost_rate[j]
    pub immediate_cost: Vec<Vec<f64>>,
    /// ceil(distance[i] / speed[j]), whole days
    pub delivery_days: Vec<Vec<i64>>,
    /// max(0, delivery_days[i][j] - scheduled_days[i])
    pub lateness: Vec<Vec<i64>>,
    /// lateness[i][j] * penalty_per_day_late * price[i]
    pub late_penalty: Vec<Vec<f64>>,
}

impl CostMatrices {
    pub fn num_orders(&self) -> usize {
        self.immediate_cost.len()
    }

    pub fn num_modes(&self) -> usize {
        self.immediate_cost.first().map_or(0, Vec::len)
    }
}

/// Derive the cost and timing matrices for a batch.
///
/// Partial delivery days round up: a shipment that would arrive at day 2.1
/// takes 3 days.
pub fn build_matrices(
    orders: &[Order],
    table: &ModeTable,
    config: &PlanConfig,
) -> Result<CostMatrices, ModelError> {
    if table.is_empty() {
        return Err(ModelError::EmptyModeTable);
    }
    if orders.is_empty() {
        return Err(ModelError::EmptyBatch);
    }
    for params in &table.modes {
        if !(params.speed_km_per_day > 0.0) || !(params.cost_rate > 0.0) {
            return Err(ModelError::InvalidModeParams(params.mode.to_string()));
        }
    }
    for order in orders {
        if !order.price.is_finite() {
            return Err(ModelError::NonFiniteValue(order.id.clone(), "price"));
        }
        if !order.distance_km.is_finite() {
            return Err(ModelError::NonFiniteValue(order.id.clone(), "distance"));
        }
        if order.price < 0.0 {
            return Err(ModelError::NegativePrice(order.id.clone(), order.price));
        }
        if order.distance_km < 0.0 {
            return Err(ModelError::NegativeDistance(
                order.id.clone(),
                order.distance_km,
            ));
        }
        if order.scheduled_days < 0 {
            return Err(ModelError::NegativeScheduledDays(
                order.id.clone(),
                order.scheduled_days,
            ));
        }
    }

    let mut immediate_cost = Vec::with_capacity(orders.len());
    let mut delivery_days = Vec::with_capacity(orders.len());
    let mut lateness = Vec::with_capacity(orders.len());
    let mut late_penalty = Vec::with_capacity(orders.len());

    for order in orders {
        let mut cost_row = Vec::with_capacity(table.len());
        let mut days_row = Vec::with_capacity(table.len());
        let mut late_row = Vec::with_capacity(table.len());
        let mut penalty_row = Vec::with_capacity(table.len());

        for params in &table.modes {
            let days = (order.distance_km / params.speed_km_per_day).ceil() as i64;
            let late = (days - order.scheduled_days).max(0);
            cost_row.push(order.price * params.cost_rate);
            days_row.push(days);
            late_row.push(late);
            penalty_row.push(late as f64 * config.penalty_per_day_late * order.price);
        }

        immediate_cost.push(cost_row);
        delivery_days.push(days_row);
        lateness.push(late_row);
        late_penalty.push(penalty_row);
    }

    Ok(CostMatrices {
        immediate_cost,
        delivery_days,
        lateness,
        late_penalty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::ShippingMode;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_order_matrices() {
        let orders = [Order::new("1", 100.0, 2, 2000.0)];
        let matrices =
            build_matrices(&orders, &ModeTable::default(), &PlanConfig::default()).unwrap();

        // Modes in table order: First_Class, Same_Day, Second_Class, Standard_Class
        assert_eq!(matrices.delivery_days[0], vec![1, 1, 1, 2]);
        assert_eq!(matrices.lateness[0], vec![0, 0, 0, 0]);
        let cost = &matrices.immediate_cost[0];
        assert!(close(cost[0], 4.5));
        assert!(close(cost[1], 2.5));
        assert!(close(cost[2], 1.5));
        assert!(close(cost[3], 0.9));
        assert_eq!(matrices.late_penalty[0], vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn partial_days_round_up() {
        // 2100 km at 1000 km/day lands at day 2.1 and counts as 3 days
        let orders = [Order::new("1", 10.0, 0, 2100.0)];
        let matrices =
            build_matrices(&orders, &ModeTable::default(), &PlanConfig::default()).unwrap();
        assert_eq!(matrices.delivery_days[0][3], 3);
    }

    #[test]
    fn zero_scheduled_days_makes_any_delivery_late() {
        let orders = [Order::new("1", 50.0, 0, 1500.0)];
        let config = PlanConfig::default();
        let matrices = build_matrices(&orders, &ModeTable::default(), &config).unwrap();
        // Standard_Class: ceil(1500/1000) = 2 days, all of them late
        assert_eq!(matrices.lateness[0][3], 2);
        assert!(close(matrices.late_penalty[0][3], 2.0 * 0.02 * 50.0));
    }

    #[test]
    fn zero_distance_delivers_in_zero_days() {
        let orders = [Order::new("1", 50.0, 1, 0.0)];
        let matrices =
            build_matrices(&orders, &ModeTable::default(), &PlanConfig::default()).unwrap();
        assert_eq!(matrices.delivery_days[0], vec![0, 0, 0, 0]);
        assert_eq!(matrices.lateness[0], vec![0, 0, 0, 0]);
    }

    #[test]
    fn rejects_negative_inputs() {
        let table = ModeTable::default();
        let config = PlanConfig::default();

        let err = build_matrices(&[Order::new("1", -1.0, 1, 10.0)], &table, &config).unwrap_err();
        assert!(matches!(err, ModelError::NegativePrice(_, _)));

        let err = build_matrices(&[Order::new("1", 1.0, 1, -10.0)], &table, &config).unwrap_err();
        assert!(matches!(err, ModelError::NegativeDistance(_, _)));

        let err = build_matrices(&[Order::new("1", 1.0, -1, 10.0)], &table, &config).unwrap_err();
        assert!(matches!(err, ModelError::NegativeScheduledDays(_, _)));
    }

    #[test]
    fn rejects_empty_mode_table_and_empty_batch() {
        let empty = ModeTable { modes: Vec::new() };
        let orders = [Order::new("1", 1.0, 1, 10.0)];
        let err = build_matrices(&orders, &empty, &PlanConfig::default()).unwrap_err();
        assert_eq!(err, ModelError::EmptyModeTable);

        let err = build_matrices(&[], &ModeTable::default(), &PlanConfig::default()).unwrap_err();
        assert_eq!(err, ModelError::EmptyBatch);
    }

    #[test]
    fn rejects_non_positive_mode_params() {
        let mut table = ModeTable::default();
        table.modes[0].speed_km_per_day = 0.0;
        let orders = [Order::new("1", 1.0, 1, 10.0)];
        let err = build_matrices(&orders, &table, &PlanConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidModeParams(ShippingMode::FirstClass.to_string())
        );
    }
}
