use serde::{Deserialize, Serialize};

use crate::error_code::ErrorCode;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

impl Role {
    /// Reference to a role by id only, as sent by clients when assigning roles.
    pub fn with_id(id: i32) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedRequest {
    pub limit: u32,
    pub offset: u32,
}

impl Default for PaginatedRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PaginatedRequest {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
        .normalized()
    }

    /// Limit is kept within `1..=MAX_PAGE_LIMIT`.
    pub fn normalized(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub limit: u32,
    pub offset: u32,
    pub total: u64,
}

/// Status part of a [`GenericResponse`]. Code 0 means success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub code: i32,
    pub message: Option<String>,
}

impl Header {
    pub const SUCCESS_CODE: i32 = 0;

    pub fn ok() -> Self {
        Self {
            code: Self::SUCCESS_CODE,
            message: None,
        }
    }
}

impl From<ErrorCode> for Header {
    fn from(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            message: Some(code.message().to_string()),
        }
    }
}

/// Response envelope returned by every service operation.
///
/// The body is only present when the header code is 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenericResponse<T> {
    pub header: Header,
    pub body: Option<T>,
}

impl<T> GenericResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            header: Header::ok(),
            body: Some(body),
        }
    }

    /// Successful response without a body, e.g. a lookup that found nothing.
    pub fn empty() -> Self {
        Self {
            header: Header::ok(),
            body: None,
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self {
            header: Header::from(code),
            body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.header.code == Header::SUCCESS_CODE
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.header.code)
    }
}
