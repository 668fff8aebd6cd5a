//! Backend core for a small-business quote workflow: customers, products and
//! orders ("orçamentos"), with PDF generation and e-mail delivery of the
//! rendered quote documents.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]

pub mod auth;
pub mod config;
pub mod delivery;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod rendering;
pub mod repositories;
pub mod services;

use std::sync::Arc;

use serde::Serialize;

use crate::auth::{AuthConfig, AuthService};
use crate::delivery::{LoggingMailSender, MailSender, PassthroughPdfConverter, PdfConverter};
use crate::rendering::TemplateStore;
use crate::repositories::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemorySequenceCounter,
};
use crate::services::{CustomerService, DocumentService, OrderService, ProductService};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub auth: Arc<AuthService>,
    pub customers: Arc<CustomerService>,
    pub products: Arc<ProductService>,
    pub orders: Arc<OrderService>,
    pub documents: Arc<DocumentService>,
}

impl AppState {
    /// Wires the service graph over the in-memory repositories and the stub
    /// delivery adapters. Real store or delivery backends slot in through
    /// [`AppState::with_adapters`].
    pub fn build(config: config::AppConfig) -> Self {
        Self::with_adapters(
            config,
            Arc::new(PassthroughPdfConverter),
            Arc::new(LoggingMailSender),
        )
    }

    pub fn with_adapters(
        config: config::AppConfig,
        pdf: Arc<dyn PdfConverter>,
        mail: Arc<dyn MailSender>,
    ) -> Self {
        let customer_repo = Arc::new(InMemoryCustomerRepository::new());
        let product_repo = Arc::new(InMemoryProductRepository::new());
        let order_repo = Arc::new(InMemoryOrderRepository::new());
        let counter = Arc::new(InMemorySequenceCounter::new());

        let order_service = OrderService::new(
            order_repo,
            customer_repo.clone(),
            product_repo.clone(),
        );
        let templates = TemplateStore::new(config.template_dir.clone());
        let documents = DocumentService::new(
            order_service.clone(),
            product_repo.clone(),
            templates,
            pdf,
            mail,
            config.mail_from.clone(),
        );

        let auth = AuthService::new(AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_secs: config.token_ttl_secs,
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
        });

        Self {
            config,
            auth: Arc::new(auth),
            customers: Arc::new(CustomerService::new(customer_repo)),
            products: Arc::new(ProductService::new(product_repo, counter)),
            orders: Arc::new(order_service),
            documents: Arc::new(documents),
        }
    }
}

/// Uniform JSON envelope for successful responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}
