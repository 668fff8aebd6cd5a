//! In-memory repository implementations over `DashMap`, used by the server
//! binary when no external store is wired in and by the test suite. They
//! honour the same result-or-error contract as any remote-store adapter.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{Customer, Order, Product};
use crate::repositories::{
    CustomerRepository, OrderRepository, ProductRepository, SEARCH_LIMIT,
};

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    rows: DashMap<Uuid, Customer>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        let mut customers: Vec<Customer> = self.rows.iter().map(|r| r.value().clone()).collect();
        customers.sort_by_key(|c| c.created_at);
        Ok(customers)
    }

    async fn search(&self, term: &str) -> Result<Vec<Customer>, ServiceError> {
        let needle = term.to_lowercase();
        let mut hits: Vec<Customer> = self
            .rows
            .iter()
            .filter(|r| r.value().name.to_lowercase().contains(&needle))
            .map(|r| r.value().clone())
            .collect();
        hits.sort_by_key(|c| c.created_at);
        hits.truncate(SEARCH_LIMIT);
        Ok(hits)
    }

    async fn find_by_cpf_cnpj(&self, cpf_cnpj: &str) -> Result<Vec<Customer>, ServiceError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.value().cpf_cnpj == cpf_cnpj)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn create(&self, customer: Customer) -> Result<Customer, ServiceError> {
        self.rows.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: Uuid, customer: Customer) -> Result<Customer, ServiceError> {
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                *row.value_mut() = customer.clone();
                Ok(customer)
            }
            None => Err(ServiceError::NotFound(format!(
                "Customer with ID {} not found",
                id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("Customer with ID {} not found", id)))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: DashMap<Uuid, Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        let mut products: Vec<Product> = self.rows.iter().map(|r| r.value().clone()).collect();
        products.sort_by_key(|p| p.code);
        Ok(products)
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, ServiceError> {
        let needle = term.to_lowercase();
        let code: Option<i64> = term.trim().parse().ok();
        let mut hits: Vec<Product> = self
            .rows
            .iter()
            .filter(|r| {
                let p = r.value();
                p.name.to_lowercase().contains(&needle) || code.is_some_and(|c| p.code == c)
            })
            .map(|r| r.value().clone())
            .collect();
        hits.sort_by_key(|p| p.code);
        hits.truncate(SEARCH_LIMIT);
        Ok(hits)
    }

    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        self.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, product: Product) -> Result<Product, ServiceError> {
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                *row.value_mut() = product.clone();
                Ok(product)
            }
            None => Err(ServiceError::NotFound(format!(
                "Product with ID {} not found",
                id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {} not found", id)))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    rows: DashMap<Uuid, Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders; used by tests asserting that failed
    /// validations persist nothing.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ServiceError> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Order>, ServiceError> {
        let mut orders: Vec<Order> = self.rows.iter().map(|r| r.value().clone()).collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn create(&self, order: Order) -> Result<Order, ServiceError> {
        self.rows.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, id: Uuid, order: Order) -> Result<Order, ServiceError> {
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                *row.value_mut() = order.clone();
                Ok(order)
            }
            None => Err(ServiceError::NotFound(format!(
                "Order with ID {} not found",
                id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("Order with ID {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn product(name: &str, code: i64) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            price: dec!(9.90),
            code,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn product_search_matches_name_or_exact_code() {
        let repo = InMemoryProductRepository::new();
        repo.create(product("Parafuso sextavado", 1)).await.unwrap();
        repo.create(product("Porca", 2)).await.unwrap();
        repo.create(product("Arruela", 3)).await.unwrap();

        let by_name = repo.search("paraf").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Parafuso sextavado");

        let by_code = repo.search("3").await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].name, "Arruela");

        assert!(repo.search("inexistente").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn product_search_is_capped() {
        let repo = InMemoryProductRepository::new();
        for i in 0..SEARCH_LIMIT as i64 + 10 {
            repo.create(product(&format!("Item {}", i), i)).await.unwrap();
        }
        let hits = repo.search("item").await.unwrap();
        assert_eq!(hits.len(), SEARCH_LIMIT);
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let ghost = product("Ghost", 99);
        let err = repo.update(ghost.id, ghost.clone()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = repo.delete(ghost.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
