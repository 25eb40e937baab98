use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{handle_service_error, status_for, ApiError};
use crate::methods::entities::{CreateUserRequest, EnvelopeResponse, UserResponse};
use crate::state::AppState;
use crate::methods::routes::USERS_PATH;

#[utoipa::path(
    post,
    path = USERS_PATH,
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = EnvelopeResponse<UserResponse>),
        (status = 400, description = "No role selected, unknown role or invalid payload"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_user(
    axum::extract::State(state): axum::extract::State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EnvelopeResponse<UserResponse>>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    payload
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let response = state
        .user_service
        .create(payload.into())
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_user"))?;

    let status = match response.error_code() {
        None => StatusCode::CREATED,
        Some(code) => status_for(code),
    };

    Ok((status, Json(EnvelopeResponse::from(response))))
}
