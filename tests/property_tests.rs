//! Property-based tests for the pure parts of the pipeline: total
//! computation and currency formatting.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use orcamento_api::models::{LineItem, Order};
use orcamento_api::rendering::format_brl;
use orcamento_api::services::compute_total;

fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    // Prices as cents up to R$ 100.000,00, quantities up to 1.000.
    (0i64..=10_000_000, 1u32..=1000).prop_map(|(cents, quantity)| LineItem {
        product_id: Uuid::new_v4(),
        quantity,
        unit_price: Decimal::new(cents, 2),
    })
}

fn order_with_items(items: Vec<LineItem>) -> Order {
    Order {
        id: Uuid::new_v4(),
        title: "Orçamento - 01/01/2024".into(),
        customer_id: Uuid::new_v4(),
        items,
        expires_at: Utc::now().date_naive(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

proptest! {
    #[test]
    fn total_is_sum_of_line_totals(items in prop::collection::vec(line_item_strategy(), 0..20)) {
        let expected: Decimal = items
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();
        let order = order_with_items(items);
        prop_assert_eq!(compute_total(&order), expected);
    }

    #[test]
    fn total_is_idempotent_and_non_mutating(items in prop::collection::vec(line_item_strategy(), 1..10)) {
        let order = order_with_items(items);
        let snapshot = order.clone();
        let first = compute_total(&order);
        let second = compute_total(&order);
        prop_assert_eq!(first, second);
        prop_assert_eq!(order, snapshot);
    }

    #[test]
    fn brl_formatting_always_has_two_decimals(cents in 0i64..=1_000_000_000) {
        let formatted = format_brl(Decimal::new(cents, 2));
        prop_assert!(formatted.starts_with("R$ "));
        let (_, decimals) = formatted.rsplit_once(',').unwrap();
        prop_assert_eq!(decimals.len(), 2);
    }

    #[test]
    fn brl_formatting_groups_thousands(units in 0i64..=1_000_000_000) {
        let formatted = format_brl(Decimal::from(units));
        let integer_part = formatted
            .strip_prefix("R$ ")
            .unwrap()
            .rsplit_once(',')
            .unwrap()
            .0
            .to_string();
        for group in integer_part.split('.').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
        let digits: String = integer_part.chars().filter(|c| *c != '.').collect();
        prop_assert_eq!(digits, units.to_string());
    }
}
