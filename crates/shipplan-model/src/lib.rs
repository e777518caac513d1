mod extract;
mod formulate;
mod matrix;
mod modes;
mod order;
mod plan;

pub use extract::{Assignment, extract_assignment};
pub use formulate::{effective_capacity, formulate};
pub use matrix::{CostMatrices, ModelError, build_matrices};
pub use modes::{LatenessEncoding, ModeParams, ModeTable, PlanConfig, ShippingMode};
pub use order::Order;
pub use plan::{PlanError, plan};
