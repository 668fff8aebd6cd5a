use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days a quote stays valid after creation.
pub const EXPIRATION_DAYS: i64 = 7;

/// A product reference embedded in an order. The unit price is captured when
/// the order is assembled and is deliberately decoupled from the product's
/// current price: repricing a product must not rewrite historical quotes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A quote: one customer reference plus an ordered, non-empty list of line
/// items. The total is never stored; it is recomputed from the items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub title: String,
    pub customer_id: Uuid,
    pub items: Vec<LineItem>,
    /// Creation date + [`EXPIRATION_DAYS`], rendered as `dd/mm/YYYY`.
    pub expires_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw assembly input for creating or fully replacing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub items: Vec<NewLineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLineItem {
    pub product_id: Uuid,
    pub quantity: u32,
    /// Price as supplied by the caller, not re-derived from the product.
    pub unit_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = LineItem {
            product_id: Uuid::new_v4(),
            quantity: 3,
            unit_price: dec!(12.50),
        };
        assert_eq!(item.line_total(), dec!(37.50));
    }
}
