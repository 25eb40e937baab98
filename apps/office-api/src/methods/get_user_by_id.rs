use axum::Json;
use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{EnvelopeResponse, UserResponse};
use crate::methods::parse_user_id;
use crate::state::AppState;
use crate::methods::routes::USERS_BY_ID_PATH;

#[utoipa::path(
    get,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = EnvelopeResponse<UserResponse>),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_user_by_id(
    axum::extract::Path(id): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<EnvelopeResponse<UserResponse>>, ApiError> {
    let user_id = parse_user_id(&id)?;

    let response = state
        .user_service
        .find(user_id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "get_user_by_id"))?;

    // the service answers a missing user with an empty body
    if response.body.is_none() {
        return Err(ApiError::user_not_found());
    }

    Ok(Json(EnvelopeResponse::from(response)))
}
