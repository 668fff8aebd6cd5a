use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::order::EXPIRATION_DAYS;
use crate::models::{LineItem, NewLineItem, NewOrder, Order};
use crate::rendering::{format_date, DocumentLineItem, OrderDocument};
use crate::repositories::{CustomerRepository, OrderRepository, ProductRepository};

/// Pure total over an order's line items: Σ unit_price × quantity. Zero for
/// an itemless order. Never mutates its input.
pub fn compute_total(order: &Order) -> Decimal {
    order.items.iter().map(LineItem::line_total).sum()
}

/// Order assembly: builds and replaces quote aggregates from raw input,
/// deriving the title and expiration date and capturing line-item prices as
/// supplied by the caller.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            orders,
            customers,
            products,
        }
    }

    /// Creates an order from the supplied input, stamping it with the
    /// current time.
    #[instrument(skip(self, input))]
    pub async fn create_order(&self, input: NewOrder) -> Result<Order, ServiceError> {
        self.create_order_at(input, Utc::now()).await
    }

    /// Creation with an explicit `now`, so title and expiration date are
    /// deterministic under test.
    pub async fn create_order_at(
        &self,
        input: NewOrder,
        now: DateTime<Utc>,
    ) -> Result<Order, ServiceError> {
        validate_items(&input.items)?;

        let title = self.derive_title(input.customer_id, now).await;
        let order = Order {
            id: Uuid::new_v4(),
            title,
            customer_id: input.customer_id,
            items: input.items.into_iter().map(into_line_item).collect(),
            expires_at: (now + Duration::days(EXPIRATION_DAYS)).date_naive(),
            created_at: now,
            updated_at: now,
        };

        self.orders.create(order).await
    }

    /// Fully replaces an existing order: customer reference, line-item list,
    /// title and expiration date. No merge semantics.
    #[instrument(skip(self, input))]
    pub async fn update_order(&self, id: Uuid, input: NewOrder) -> Result<Order, ServiceError> {
        self.update_order_at(id, input, Utc::now()).await
    }

    pub async fn update_order_at(
        &self,
        id: Uuid,
        input: NewOrder,
        now: DateTime<Utc>,
    ) -> Result<Order, ServiceError> {
        let existing = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order with ID {} not found", id)))?;

        validate_items(&input.items)?;

        let title = self.derive_title(input.customer_id, now).await;
        let replacement = Order {
            id: existing.id,
            title,
            customer_id: input.customer_id,
            items: input.items.into_iter().map(into_line_item).collect(),
            expires_at: (now + Duration::days(EXPIRATION_DAYS)).date_naive(),
            created_at: existing.created_at,
            updated_at: now,
        };

        self.orders.update(id, replacement).await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> Result<Order, ServiceError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order with ID {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> {
        self.orders.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: Uuid) -> Result<(), ServiceError> {
        self.orders.delete(id).await
    }

    /// Joins an order with its customer and each line item's product, ready
    /// for rendering. A missing product is a hard Not-Found; a missing
    /// customer is tolerated (the document renders without a name).
    #[instrument(skip(self))]
    pub async fn order_document(&self, id: Uuid) -> Result<OrderDocument, ServiceError> {
        let order = self.get_order(id).await?;

        let customer = self.customers.find_by_id(order.customer_id).await?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let product = self
                .products
                .find_by_id(item.product_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "Product with ID {} not found",
                        item.product_id
                    ))
                })?;
            items.push(DocumentLineItem {
                product,
                item: item.clone(),
            });
        }

        Ok(OrderDocument {
            order,
            customer,
            items,
        })
    }

    /// Looks up the customer to compose the quote title. Lookup failure is
    /// tolerated: the title simply omits the customer name.
    async fn derive_title(&self, customer_id: Uuid, now: DateTime<Utc>) -> String {
        let date = format_date(now.date_naive());
        match self.customers.find_by_id(customer_id).await {
            Ok(Some(customer)) => format!("Orçamento - {} - {}", customer.name, date),
            Ok(None) => {
                warn!(%customer_id, "customer not found while assembling order title");
                format!("Orçamento - {}", date)
            }
            Err(err) => {
                warn!(%customer_id, error = %err, "customer lookup failed while assembling order title");
                format!("Orçamento - {}", date)
            }
        }
    }
}

fn validate_items(items: &[NewLineItem]) -> Result<(), ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::ValidationError(
            "Order must have at least one line item".to_string(),
        ));
    }
    for item in items {
        if item.quantity == 0 {
            return Err(ServiceError::ValidationError(
                "Line item quantity must be positive".to_string(),
            ));
        }
        if item.unit_price.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "Line item price must not be negative".to_string(),
            ));
        }
    }
    Ok(())
}

fn into_line_item(input: NewLineItem) -> LineItem {
    LineItem {
        product_id: input.product_id,
        quantity: input.quantity,
        unit_price: input.unit_price,
    }
}
