pub mod auth;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Assembles the full API surface over the shared state. Middleware layers
/// (tracing, CORS, compression, timeouts) are applied by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route(
            "/customers",
            get(customers::list).post(customers::create),
        )
        .route("/customers/search", get(customers::search))
        .route(
            "/customers/:id",
            get(customers::detail)
                .put(customers::update)
                .delete(customers::remove),
        )
        .route("/products", get(products::list).post(products::create))
        .route("/products/search", get(products::search))
        .route(
            "/products/pricelist/download",
            get(products::download_price_list),
        )
        .route(
            "/products/:id",
            get(products::detail)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/:id",
            get(orders::detail)
                .put(orders::update)
                .delete(orders::remove),
        )
        .route("/orders/:id/download", post(orders::download))
        .route("/orders/:id/send", post(orders::send))
        .with_state(state)
}

/// Query parameter for the search endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct SearchQuery {
    pub q: String,
}
