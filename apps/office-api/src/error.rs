use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use office_lib::{ErrorCode, UserServiceError};

use crate::methods::entities::{EnvelopeResponse, HeaderResponse};

#[derive(Debug)]
pub enum ApiError {
    /// Malformed input, reported as `ErrorCode::InvalidData` with a detail message.
    BadRequest(String),
    /// Business outcome carrying its own code.
    Rejected(ErrorCode),
    Internal(String),
}

impl ApiError {
    pub fn invalid_id() -> Self {
        ApiError::BadRequest("invalid user id".to_string())
    }

    pub fn user_not_found() -> Self {
        ApiError::Rejected(ErrorCode::OfficeNotFound)
    }
}

/// HTTP status used when an envelope carries `code`.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::OfficeNotFound => StatusCode::NOT_FOUND,
        ErrorCode::NotRoleSelected | ErrorCode::RoleNotFound | ErrorCode::InvalidData => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::UsernameAlreadyExists | ErrorCode::EmailAlreadyExists => StatusCode::CONFLICT,
        ErrorCode::ServiceError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            ApiError::BadRequest(msg) => (ErrorCode::InvalidData, msg),
            ApiError::Rejected(code) => (code, code.message().to_string()),
            ApiError::Internal(msg) => (ErrorCode::ServiceError, msg),
        };

        let body: EnvelopeResponse<()> = EnvelopeResponse {
            header: HeaderResponse {
                code: code.code(),
                message: Some(message),
            },
            body: None,
        };

        (status_for(code), Json(body)).into_response()
    }
}

/// Check if environment is production-like (prod, prod01, prod02, etc.)
pub fn is_prod_like(env: &str) -> bool {
    env.to_lowercase().starts_with("prod")
}

/// Converts a service error to an ApiError, logging internal errors.
/// In production, internal error details are hidden.
pub fn handle_service_error(err: UserServiceError, env: &str, operation: &str) -> ApiError {
    match err {
        UserServiceError::Business(code) => {
            tracing::info!(operation = %operation, code = code.code(), reason = %code, "business error");
            ApiError::Rejected(code)
        }
        other => {
            tracing::error!(env = %env, error = ?other, operation = %operation, "service error");
            if is_prod_like(env) {
                ApiError::Internal(ErrorCode::ServiceError.message().to_string())
            } else {
                ApiError::Internal(other.to_string())
            }
        }
    }
}
