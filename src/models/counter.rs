use serde::{Deserialize, Serialize};

/// Name of the single sequence used to mint product codes.
pub const PRODUCT_CODE_COUNTER: &str = "counter";

/// Persisted state of a named sequence. Exactly one record exists per name
/// and its value is monotonically non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Counter {
    pub name: String,
    pub value: i64,
}
