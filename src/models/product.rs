use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable product. The sequential `code` is minted once from the shared
/// counter when the product is created and never changes afterwards; name and
/// price stay mutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub code: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
