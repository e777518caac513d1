use std::fmt;

/// The fixed set of shipping service levels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingMode {
    #[cfg_attr(feature = "serde", serde(rename = "First_Class"))]
    FirstClass,
    #[cfg_attr(feature = "serde", serde(rename = "Same_Day"))]
    SameDay,
    #[cfg_attr(feature = "serde", serde(rename = "Second_Class"))]
    SecondClass,
    #[cfg_attr(feature = "serde", serde(rename = "Standard_Class"))]
    StandardClass,
}

impl ShippingMode {
    pub const ALL: [ShippingMode; 4] = [
        ShippingMode::FirstClass,
        ShippingMode::SameDay,
        ShippingMode::SecondClass,
        ShippingMode::StandardClass,
    ];

    /// Dataset spelling of the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMode::FirstClass => "First_Class",
            ShippingMode::SameDay => "Same_Day",
            ShippingMode::SecondClass => "Second_Class",
            ShippingMode::StandardClass => "Standard_Class",
        }
    }
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-mode constants: how fast the mode travels and what it charges.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeParams {
    pub mode: ShippingMode,
    /// Distance covered per day, km
    pub speed_km_per_day: f64,
    /// Immediate shipping cost as a fraction of item price
    pub cost_rate: f64,
}

/// Ordered table of available modes and their constants. Defined once per
/// run, never mutated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ModeTable {
    pub modes: Vec<ModeParams>,
}

impl ModeTable {
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            modes: vec![
                ModeParams {
                    mode: ShippingMode::FirstClass,
                    speed_km_per_day: 7000.0,
                    cost_rate: 0.045,
                },
                ModeParams {
                    mode: ShippingMode::SameDay,
                    speed_km_per_day: 5000.0,
                    cost_rate: 0.025,
                },
                ModeParams {
                    mode: ShippingMode::SecondClass,
                    speed_km_per_day: 3000.0,
                    cost_rate: 0.015,
                },
                ModeParams {
                    mode: ShippingMode::StandardClass,
                    speed_km_per_day: 1000.0,
                    cost_rate: 0.009,
                },
            ],
        }
    }
}

/// How the per-pair lateness cap enters the model. Both encodings describe
/// the same feasible region.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatenessEncoding {
    /// Pin x[i,j] = 0 at build time wherever lateness exceeds the cap
    Eliminate,
    /// Emit one lateness[i,j] * x[i,j] <= cap row per offending pair
    PerPair,
}

/// Batch-level configuration, passed explicitly into the matrix builder and
/// formulator rather than read from ambient state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanConfig {
    /// Late-delivery penalty per day, as a fraction of item price
    pub penalty_per_day_late: f64,
    /// Share of the batch a single mode may serve
    pub capacity_fraction: f64,
    /// Maximum tolerated lateness for a chosen (order, mode) pair, days
    pub lateness_cap_days: i64,
    pub lateness_encoding: LatenessEncoding,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            penalty_per_day_late: 0.02,
            capacity_fraction: 0.25,
            lateness_cap_days: 5,
            lateness_encoding: LatenessEncoding::Eliminate,
        }
    }
}
