use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::SearchQuery;
use crate::services::products::{NewProduct, ProductUpdate};
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.products.list_products().await?;
    Ok(Json(ApiResponse::ok(products)))
}

pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.products.search_products(&query.q).await?;
    Ok(Json(ApiResponse::ok(products)))
}

pub async fn detail(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.products.get_product(id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let product = state
        .products
        .create_product(NewProduct {
            name: payload.name,
            price: payload.price,
        })
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        product,
        "Product add success",
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let product = state
        .products
        .update_product(
            id,
            ProductUpdate {
                name: payload.name,
                price: payload.price,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        product,
        "Product update success",
    )))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.products.delete_product(id).await?;
    Ok(Json(ApiResponse::<()>::message("Product delete success")))
}

/// Renders the current price list and streams it back as a PDF.
pub async fn download_price_list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let bytes = state.documents.download_price_list().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"price_list.pdf\"",
            ),
        ],
        bytes,
    ))
}
