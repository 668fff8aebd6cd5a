//! Persistence boundary. The document store behind the real deployment is an
//! external collaborator; services only ever talk to these traits. Every
//! method resolves to a value or a `ServiceError`, never a callback.

pub mod counter;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{Customer, Order, Product};

pub use counter::{InMemorySequenceCounter, SequenceCounter};
pub use memory::{InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository};

/// Upper bound on rows returned by the search endpoints, mirroring the
/// lookup widgets they feed.
pub const SEARCH_LIMIT: usize = 15;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError>;
    /// Case-insensitive name substring match, capped at [`SEARCH_LIMIT`].
    async fn search(&self, term: &str) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_cpf_cnpj(&self, cpf_cnpj: &str) -> Result<Vec<Customer>, ServiceError>;
    async fn create(&self, customer: Customer) -> Result<Customer, ServiceError>;
    async fn update(&self, id: Uuid, customer: Customer) -> Result<Customer, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    /// Name substring (case-insensitive) or exact code match, capped at
    /// [`SEARCH_LIMIT`].
    async fn search(&self, term: &str) -> Result<Vec<Product>, ServiceError>;
    async fn create(&self, product: Product) -> Result<Product, ServiceError>;
    async fn update(&self, id: Uuid, product: Product) -> Result<Product, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Order>, ServiceError>;
    async fn create(&self, order: Order) -> Result<Order, ServiceError>;
    async fn update(&self, id: Uuid, order: Order) -> Result<Order, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}
