use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::SearchQuery;
use crate::services::customers::{CustomerUpdate, NewCustomer};
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 11, message = "CPF/CNPJ must not be empty"))]
    pub cpf_cnpj: String,
    pub cep: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub inscricao_estadual: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 11, message = "CPF/CNPJ must not be empty"))]
    pub cpf_cnpj: Option<String>,
    pub cep: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub inscricao_estadual: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.customers.list_customers().await?;
    Ok(Json(ApiResponse::ok(customers)))
}

pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.customers.search_customers(&query.q).await?;
    Ok(Json(ApiResponse::ok(customers)))
}

pub async fn detail(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.get_customer(id).await?;
    Ok(Json(ApiResponse::ok(customer)))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let customer = state
        .customers
        .create_customer(NewCustomer {
            name: payload.name,
            phone: payload.phone,
            email: payload.email,
            cpf_cnpj: payload.cpf_cnpj,
            cep: payload.cep,
            street: payload.street,
            district: payload.district,
            number: payload.number,
            city: payload.city,
            state: payload.state,
            inscricao_estadual: payload.inscricao_estadual,
        })
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        customer,
        "Customer add success",
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let customer = state
        .customers
        .update_customer(
            id,
            CustomerUpdate {
                name: payload.name,
                phone: payload.phone,
                email: payload.email,
                cpf_cnpj: payload.cpf_cnpj,
                cep: payload.cep,
                street: payload.street,
                district: payload.district,
                number: payload.number,
                city: payload.city,
                state: payload.state,
                inscricao_estadual: payload.inscricao_estadual,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        customer,
        "Customer update success",
    )))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.customers.delete_customer(id).await?;
    Ok(Json(ApiResponse::<()>::message("Customer delete success")))
}
