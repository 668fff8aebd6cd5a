use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use validator::Validate;

use crate::auth::LoginResponse;
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let response: LoginResponse = state.auth.login(&payload.username, &payload.password)?;
    Ok(Json(ApiResponse::ok(response)))
}
