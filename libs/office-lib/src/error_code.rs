use std::fmt;

use serde::{Deserialize, Serialize};

/// Business error identifiers shared by the service and its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    OfficeNotFound,
    NotRoleSelected,
    RoleNotFound,
    UsernameAlreadyExists,
    EmailAlreadyExists,
    InvalidData,
    ServiceError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::OfficeNotFound,
        ErrorCode::NotRoleSelected,
        ErrorCode::RoleNotFound,
        ErrorCode::UsernameAlreadyExists,
        ErrorCode::EmailAlreadyExists,
        ErrorCode::InvalidData,
        ErrorCode::ServiceError,
    ];

    pub const fn code(self) -> i32 {
        match self {
            ErrorCode::OfficeNotFound => 1001,
            ErrorCode::NotRoleSelected => 1002,
            ErrorCode::RoleNotFound => 1003,
            ErrorCode::UsernameAlreadyExists => 1004,
            ErrorCode::EmailAlreadyExists => 1005,
            ErrorCode::InvalidData => 1006,
            ErrorCode::ServiceError => 9999,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::OfficeNotFound => "record not found",
            ErrorCode::NotRoleSelected => "at least one role must be selected",
            ErrorCode::RoleNotFound => "role not found",
            ErrorCode::UsernameAlreadyExists => "username already exists",
            ErrorCode::EmailAlreadyExists => "email already exists",
            ErrorCode::InvalidData => "invalid data",
            ErrorCode::ServiceError => "internal service error",
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
