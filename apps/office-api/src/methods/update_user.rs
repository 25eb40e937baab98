use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{handle_service_error, status_for, ApiError};
use crate::methods::entities::{EnvelopeResponse, UpdateUserRequest};
use crate::methods::parse_user_id;
use crate::state::AppState;
use crate::methods::routes::USERS_BY_ID_PATH;

#[utoipa::path(
    put,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = EnvelopeResponse<bool>),
        (status = 400, description = "Invalid id, unknown role or invalid payload"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn update_user(
    axum::extract::Path(id): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EnvelopeResponse<bool>>), ApiError> {
    let user_id = parse_user_id(&id)?;
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    payload
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let response = state
        .user_service
        .update(payload.into_user(user_id))
        .await
        .map_err(|e| handle_service_error(e, &state.env, "update_user"))?;

    let status = response.error_code().map_or(StatusCode::OK, status_for);
    Ok((status, Json(EnvelopeResponse::from(response))))
}
