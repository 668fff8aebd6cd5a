use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::models::{NewLineItem, NewOrder, Order};
use crate::services::compute_total;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OrderRequest {
    pub customer_id: Uuid,
    #[validate(length(min = 1, message = "Order must have at least one line item"))]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: u32,
    /// Price captured at order time; deliberately not re-read from the
    /// product record.
    pub unit_price: Decimal,
}

/// Order as presented to clients, with the recomputed total attached.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub title: String,
    pub customer_id: Uuid,
    pub items: Vec<crate::models::LineItem>,
    pub total: Decimal,
    pub expires_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total = compute_total(&order);
        Self {
            id: order.id,
            title: order.title,
            customer_id: order.customer_id,
            items: order.items,
            total,
            expires_at: order.expires_at,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<OrderRequest> for NewOrder {
    fn from(req: OrderRequest) -> Self {
        NewOrder {
            customer_id: req.customer_id,
            items: req
                .items
                .into_iter()
                .map(|item| NewLineItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.orders.list_orders().await?;
    let responses: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(Json(ApiResponse::ok(responses)))
}

pub async fn detail(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.orders.get_order(id).await?;
    Ok(Json(ApiResponse::ok(OrderResponse::from(order))))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<OrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let order = state.orders.create_order(payload.into()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        OrderResponse::from(order),
        "Order add success",
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let order = state.orders.update_order(id, payload.into()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        OrderResponse::from(order),
        "Order update success",
    )))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.orders.delete_order(id).await?;
    Ok(Json(ApiResponse::<()>::message("Order delete success")))
}

/// Renders the quote document and streams it back as a PDF.
pub async fn download(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let bytes = state.documents.download_order(id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orcamento.pdf\"",
            ),
        ],
        bytes,
    ))
}

/// E-mails the quote document to the order's customer.
pub async fn send(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let confirmation = state.documents.email_order(id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        confirmation,
        "Order sent",
    )))
}
