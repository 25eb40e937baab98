use crate::error_code::ErrorCode;
use crate::repository::errors::UserRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UserServiceError {
    /// Business rule violation raised to the caller instead of being encoded
    /// in the response envelope.
    #[error("{0}")]
    Business(ErrorCode),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UserServiceError {
    pub fn not_found() -> Self {
        UserServiceError::Business(ErrorCode::OfficeNotFound)
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            UserServiceError::Business(code) => *code,
            UserServiceError::Internal(_) => ErrorCode::ServiceError,
        }
    }

    pub fn code(&self) -> i32 {
        self.error_code().code()
    }
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::UsernameAlreadyExists => {
                UserServiceError::Business(ErrorCode::UsernameAlreadyExists)
            }
            UserRepositoryError::EmailAlreadyExists => {
                UserServiceError::Business(ErrorCode::EmailAlreadyExists)
            }
            UserRepositoryError::RoleNotFound => UserServiceError::Business(ErrorCode::RoleNotFound),
            UserRepositoryError::NotFound => UserServiceError::not_found(),
            UserRepositoryError::Sqlx(e) => UserServiceError::Internal(e.into()),
        }
    }
}
