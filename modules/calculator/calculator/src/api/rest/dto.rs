use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    pub expression: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculateResponse {
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `Some` when `value` is a whole number that fits losslessly in an `i64`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // guarded by the fract/range check
pub fn exact_integer(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER).then(|| value as i64)
}

/// Integral results are written as JSON integers (`5`), all others as
/// floats (`3.5`).
///
/// # Errors
/// Propagates serializer errors.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
pub fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match exact_integer(*value) {
        Some(n) => serializer.serialize_i64(n),
        None => serializer.serialize_f64(*value),
    }
}

/// Same convention as [`serialize_number`], for HTML output.
#[must_use]
pub fn display_number(value: f64) -> String {
    match exact_integer(value) {
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}
