use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::Customer;
use crate::repositories::CustomerRepository;

/// Fields accepted when registering a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub cpf_cnpj: String,
    pub cep: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub inscricao_estadual: Option<String>,
}

/// Partial update: only the supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub cep: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub inscricao_estadual: Option<String>,
}

/// Service for managing customers.
#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    /// Registers a customer. The tax identifier must not already be in use.
    #[instrument(skip(self, input), fields(cpf_cnpj = %input.cpf_cnpj))]
    pub async fn create_customer(&self, input: NewCustomer) -> Result<Customer, ServiceError> {
        let existing = self.customers.find_by_cpf_cnpj(&input.cpf_cnpj).await?;
        if !existing.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "Customer with CPF/CNPJ {} already registered",
                input.cpf_cnpj
            )));
        }

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name,
            phone: input.phone,
            email: input.email,
            cpf_cnpj: input.cpf_cnpj,
            cep: input.cep,
            street: input.street,
            district: input.district,
            number: input.number,
            city: input.city,
            state: input.state,
            inscricao_estadual: input.inscricao_estadual,
            created_at: now,
            updated_at: now,
        };
        self.customers.create(customer).await
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, ServiceError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer with ID {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        self.customers.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn search_customers(&self, term: &str) -> Result<Vec<Customer>, ServiceError> {
        self.customers.search(term).await
    }

    /// Applies a partial update to an existing customer.
    #[instrument(skip(self, update))]
    pub async fn update_customer(
        &self,
        id: Uuid,
        update: CustomerUpdate,
    ) -> Result<Customer, ServiceError> {
        let mut customer = self.get_customer(id).await?;

        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(cpf_cnpj) = update.cpf_cnpj {
            customer.cpf_cnpj = cpf_cnpj;
        }
        merge(&mut customer.phone, update.phone);
        merge(&mut customer.email, update.email);
        merge(&mut customer.cep, update.cep);
        merge(&mut customer.street, update.street);
        merge(&mut customer.district, update.district);
        merge(&mut customer.number, update.number);
        merge(&mut customer.city, update.city);
        merge(&mut customer.state, update.state);
        merge(&mut customer.inscricao_estadual, update.inscricao_estadual);
        customer.updated_at = Utc::now();

        self.customers.update(id, customer).await
    }

    /// Deletes a customer. Historical orders keep their (now dangling)
    /// reference; rendering tolerates it.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: Uuid) -> Result<(), ServiceError> {
        self.customers.delete(id).await
    }
}

fn merge(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}
