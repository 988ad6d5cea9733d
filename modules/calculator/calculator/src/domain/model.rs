use chrono::{DateTime, Utc};

/// One persisted calculation.
///
/// `expression` is the raw validated input, stored as received. Records are
/// never updated once written.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRecord {
    pub expression: String,
    pub result: f64,
    pub created_at: DateTime<Utc>,
}
