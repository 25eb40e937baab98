use office_lib::entities::{
    GenericResponse, PaginatedRequest, PaginatedResponse as PageResult, Role, User,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    /// Ids of the roles to assign; at least one is required.
    #[serde(default)]
    pub roles: Vec<i32>,
}

impl From<CreateUserRequest> for User {
    fn from(request: CreateUserRequest) -> Self {
        User {
            id: 0,
            username: request.username,
            email: request.email,
            name: request.name,
            last_name: request.last_name,
            roles: request.roles.into_iter().map(Role::with_id).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    /// Replaces the current roles when not empty.
    #[serde(default)]
    pub roles: Vec<i32>,
}

impl UpdateUserRequest {
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            name: self.name,
            last_name: self.last_name,
            roles: self.roles.into_iter().map(Role::with_id).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        RoleResponse {
            id: role.id,
            name: role.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub roles: Vec<RoleResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            last_name: user.last_name,
            roles: user.roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Maximum number of rows (1-100, default 10)
    pub limit: Option<u32>,
    /// Rows to skip (default 0)
    pub offset: Option<u32>,
}

impl From<PaginationQuery> for PaginatedRequest {
    fn from(query: PaginationQuery) -> Self {
        PaginatedRequest::new(query.limit, query.offset)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub limit: u32,
    pub offset: u32,
    pub total: u64,
}

impl<T, U> From<PageResult<T>> for PaginatedResponse<U>
where
    U: From<T>,
{
    fn from(result: PageResult<T>) -> Self {
        PaginatedResponse {
            data: result.data.into_iter().map(U::from).collect(),
            limit: result.limit,
            offset: result.offset,
            total: result.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeaderResponse {
    /// 0 on success, otherwise the business error code
    pub code: i32,
    pub message: Option<String>,
}

/// Response envelope: status header plus a body present only on success.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnvelopeResponse<T> {
    pub header: HeaderResponse,
    pub body: Option<T>,
}

impl<T, U> From<GenericResponse<T>> for EnvelopeResponse<U>
where
    U: From<T>,
{
    fn from(response: GenericResponse<T>) -> Self {
        EnvelopeResponse {
            header: HeaderResponse {
                code: response.header.code,
                message: response.header.message,
            },
            body: response.body.map(U::from),
        }
    }
}
