/// A single shipment request. Immutable once loaded; one per row of the
/// external dataset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// External order identifier
    pub id: String,
    /// Item price in currency units
    pub price: f64,
    /// Scheduled delivery window in days. Zero is legal and means the
    /// customer expects same-day delivery.
    pub scheduled_days: i64,
    /// Precomputed shipment distance in km
    pub distance_km: f64,
}

impl Order {
    pub fn new(id: impl Into<String>, price: f64, scheduled_days: i64, distance_km: f64) -> Self {
        Self {
            id: id.into(),
            price,
            scheduled_days,
            distance_km,
        }
    }
}
