use async_trait::async_trait;

use crate::entities::PaginatedRequest;
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::{NewUserRow, RoleRow, UserRoleMapping, UserRow};

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts the user and its role assignments atomically.
    async fn create_user(&self, user: &NewUserRow) -> Result<UserRow, UserRepositoryError>;
    async fn get_user(&self, user_id: i32) -> Result<Option<UserRow>, UserRepositoryError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError>;
    /// Updates the user fields and, when `role_ids` is not empty, replaces its
    /// role assignments, all in one transaction. A user that no longer exists
    /// yields `UserRepositoryError::NotFound` and nothing is written.
    async fn update_user_with_roles(&self, user: &UserRow, role_ids: &[i32]) -> Result<(), UserRepositoryError>;
    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepositoryError>;
    async fn get_users_paginated(&self, request: PaginatedRequest) -> Result<(Vec<UserRow>, u64), UserRepositoryError>;
}

#[async_trait]
pub trait RoleRepositoryTrait: Send + Sync {
    async fn get_role(&self, role_id: i32) -> Result<Option<RoleRow>, UserRepositoryError>;
    async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<RoleRow>, UserRepositoryError>;
    async fn get_roles_for_users(&self, user_ids: &[i32]) -> Result<Vec<UserRoleMapping>, UserRepositoryError>;
    async fn get_roles_paginated(&self, request: PaginatedRequest) -> Result<(Vec<RoleRow>, u64), UserRepositoryError>;
}
