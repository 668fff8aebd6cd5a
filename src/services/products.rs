use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::Product;
use crate::repositories::{ProductRepository, SequenceCounter};

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// Service for managing products. Creation mints the sequential code from
/// the shared counter; the code never changes afterwards.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    counter: Arc<dyn SequenceCounter>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, counter: Arc<dyn SequenceCounter>) -> Self {
        Self { products, counter }
    }

    /// Creates a product. A counter failure aborts the whole operation: no
    /// product may exist without a code.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: NewProduct) -> Result<Product, ServiceError> {
        if input.price.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "Product price must not be negative".to_string(),
            ));
        }

        let code = self.counter.next_code().await?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            price: input.price,
            code,
            created_at: now,
            updated_at: now,
        };
        self.products.create(product).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> Result<Product, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.products.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ServiceError> {
        self.products.search(term).await
    }

    /// Updates name and/or price. The code is immutable and existing orders
    /// keep the price they captured at assembly time.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ServiceError> {
        let mut product = self.get_product(id).await?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(price) = update.price {
            if price.is_sign_negative() {
                return Err(ServiceError::ValidationError(
                    "Product price must not be negative".to_string(),
                ));
            }
            product.price = price;
        }
        product.updated_at = Utc::now();

        self.products.update(id, product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), ServiceError> {
        self.products.delete(id).await
    }
}
