use crate::entities::{GenericResponse, PaginatedRequest, PaginatedResponse, Role, User};
use crate::error_code::ErrorCode;
use crate::errors_service::UserServiceError;
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::{NewUserRow, RoleRow, UserRoleMapping, UserRow};
use crate::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};
use crate::repository::{RoleRepository, UserRepository};
use std::collections::HashMap;
use std::sync::Arc;

/// Service over type-erased repositories, as shared by the HTTP layer.
pub type DynUserService = UserService<dyn UserRepositoryTrait, dyn RoleRepositoryTrait>;

fn role_from_row(row: RoleRow) -> Role {
    Role {
        id: row.id,
        name: row.name,
    }
}

fn role_from_mapping(mapping: UserRoleMapping) -> (i32, Role) {
    let role = Role {
        id: mapping.role_id,
        name: mapping.role_name,
    };
    (mapping.user_id, role)
}

fn user_from_row(row: UserRow, roles: Vec<Role>) -> User {
    User {
        id: row.id,
        username: row.username,
        email: row.email,
        name: row.name,
        last_name: row.last_name,
        roles,
    }
}

/// Role ids in request order, without repeats.
fn distinct_role_ids(roles: &[Role]) -> Vec<i32> {
    let mut ids: Vec<i32> = Vec::with_capacity(roles.len());
    for role in roles {
        if !ids.contains(&role.id) {
            ids.push(role.id);
        }
    }
    ids
}

/// Storage-level conflicts are business outcomes and go into the envelope.
fn rejected<T>(err: UserRepositoryError) -> Result<GenericResponse<T>, UserServiceError> {
    match UserServiceError::from(err) {
        UserServiceError::Business(code) => {
            tracing::info!(code = code.code(), reason = %code, "rejected by storage constraint");
            Ok(GenericResponse::error(code))
        }
        other => Err(other),
    }
}

pub struct UserService<U = UserRepository, R = RoleRepository>
where
    U: UserRepositoryTrait + ?Sized,
    R: RoleRepositoryTrait + ?Sized,
{
    pub user_repo: Arc<U>,
    pub role_repo: Arc<R>,
}

impl<U, R> Clone for UserService<U, R>
where
    U: UserRepositoryTrait + ?Sized,
    R: RoleRepositoryTrait + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            user_repo: Arc::clone(&self.user_repo),
            role_repo: Arc::clone(&self.role_repo),
        }
    }
}

impl UserService<UserRepository, RoleRepository> {
    pub fn new(user_repo: UserRepository, role_repo: RoleRepository) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            role_repo: Arc::new(role_repo),
        }
    }
}

impl<U, R> UserService<U, R>
where
    U: UserRepositoryTrait + ?Sized,
    R: RoleRepositoryTrait + ?Sized,
{
    pub fn with_repos(user_repo: Arc<U>, role_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            role_repo,
        }
    }

    async fn fetch_roles_for_user(&self, user_id: i32) -> Result<Vec<Role>, UserServiceError> {
        let rows = self.role_repo.get_roles_for_user(user_id).await?;
        Ok(rows.into_iter().map(role_from_row).collect())
    }

    async fn build_users_with_roles(
        &self,
        user_rows: Vec<UserRow>,
    ) -> Result<Vec<User>, UserServiceError> {
        if user_rows.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: Vec<i32> = user_rows.iter().map(|r| r.id).collect();
        let role_mappings = self.role_repo.get_roles_for_users(&user_ids).await?;

        let mut roles_by_user: HashMap<i32, Vec<Role>> = HashMap::new();
        for mapping in role_mappings {
            let (user_id, role) = role_from_mapping(mapping);
            roles_by_user.entry(user_id).or_default().push(role);
        }

        Ok(user_rows
            .into_iter()
            .map(|row| {
                let roles = roles_by_user.remove(&row.id).unwrap_or_default();
                user_from_row(row, roles)
            })
            .collect())
    }

    /// First role id that has no role record, checked in request order.
    async fn check_roles_exist(&self, role_ids: &[i32]) -> Result<Option<ErrorCode>, UserServiceError> {
        for role_id in role_ids {
            if self.role_repo.get_role(*role_id).await?.is_none() {
                tracing::info!(role_id = *role_id, "role does not exist");
                return Ok(Some(ErrorCode::RoleNotFound));
            }
        }
        Ok(None)
    }

    /// Business checks for a new user. Order matters: the first violation wins.
    async fn check_new_user(
        &self,
        user: &User,
        role_ids: &[i32],
    ) -> Result<Option<ErrorCode>, UserServiceError> {
        if role_ids.is_empty() {
            return Ok(Some(ErrorCode::NotRoleSelected));
        }
        if let Some(code) = self.check_roles_exist(role_ids).await? {
            return Ok(Some(code));
        }
        if self.user_repo.get_user_by_username(&user.username).await?.is_some() {
            return Ok(Some(ErrorCode::UsernameAlreadyExists));
        }
        if self.user_repo.get_user_by_email(&user.email).await?.is_some() {
            return Ok(Some(ErrorCode::EmailAlreadyExists));
        }
        Ok(None)
    }

    /// Same order as creation, except that an empty role list keeps the
    /// current assignments and the user may keep its own username/email.
    async fn check_updated_user(
        &self,
        user: &User,
        role_ids: &[i32],
    ) -> Result<Option<ErrorCode>, UserServiceError> {
        if let Some(code) = self.check_roles_exist(role_ids).await? {
            return Ok(Some(code));
        }
        let taken_by_other = |row: Option<UserRow>| row.is_some_and(|r| r.id != user.id);
        if taken_by_other(self.user_repo.get_user_by_username(&user.username).await?) {
            return Ok(Some(ErrorCode::UsernameAlreadyExists));
        }
        if taken_by_other(self.user_repo.get_user_by_email(&user.email).await?) {
            return Ok(Some(ErrorCode::EmailAlreadyExists));
        }
        Ok(None)
    }

    pub async fn find_users(
        &self,
        request: PaginatedRequest,
    ) -> Result<PaginatedResponse<User>, UserServiceError> {
        let request = request.normalized();
        let (user_rows, total) = self.user_repo.get_users_paginated(request).await?;
        let users = self.build_users_with_roles(user_rows).await?;
        Ok(PaginatedResponse {
            data: users,
            limit: request.limit,
            offset: request.offset,
            total,
        })
    }

    /// Looks a user up by id. A missing user is not an error: the envelope is
    /// successful and carries no body.
    pub async fn find(&self, user_id: i32) -> Result<GenericResponse<User>, UserServiceError> {
        match self.user_repo.get_user(user_id).await? {
            Some(row) => {
                let roles = self.fetch_roles_for_user(row.id).await?;
                Ok(GenericResponse::ok(user_from_row(row, roles)))
            }
            None => Ok(GenericResponse::empty()),
        }
    }

    /// Creates a user with its roles.
    ///
    /// Rule violations are reported through the envelope code with no body:
    /// no roles, unknown role, username taken, email taken, in that order.
    pub async fn create(&self, user: User) -> Result<GenericResponse<User>, UserServiceError> {
        let role_ids = distinct_role_ids(&user.roles);

        if let Some(code) = self.check_new_user(&user, &role_ids).await? {
            tracing::info!(
                username = %user.username,
                code = code.code(),
                reason = %code,
                "user creation rejected"
            );
            return Ok(GenericResponse::error(code));
        }

        let new_user = NewUserRow {
            username: user.username,
            email: user.email,
            name: user.name,
            last_name: user.last_name,
            role_ids,
        };

        let row = match self.user_repo.create_user(&new_user).await {
            Ok(row) => row,
            Err(e) => return rejected(e),
        };

        tracing::info!(user_id = row.id, username = %row.username, "user created");

        let roles = self.fetch_roles_for_user(row.id).await?;
        Ok(GenericResponse::ok(user_from_row(row, roles)))
    }

    /// Updates username, email, name and last name of an existing user, and
    /// its roles when any are given.
    ///
    /// An unknown id is raised as `ErrorCode::OfficeNotFound`; rule
    /// violations go into the envelope.
    pub async fn update(&self, user: User) -> Result<GenericResponse<bool>, UserServiceError> {
        if self.user_repo.get_user(user.id).await?.is_none() {
            tracing::warn!(user_id = user.id, "update of unknown user");
            return Err(UserServiceError::not_found());
        }

        let role_ids = distinct_role_ids(&user.roles);
        if let Some(code) = self.check_updated_user(&user, &role_ids).await? {
            tracing::info!(user_id = user.id, code = code.code(), reason = %code, "user update rejected");
            return Ok(GenericResponse::error(code));
        }

        let row = UserRow {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            last_name: user.last_name,
        };

        match self.user_repo.update_user_with_roles(&row, &role_ids).await {
            Ok(()) => {}
            Err(UserRepositoryError::NotFound) => {
                tracing::warn!(user_id = row.id, "user removed before update");
                return Err(UserServiceError::not_found());
            }
            Err(e) => return rejected(e),
        }

        tracing::info!(user_id = row.id, "user updated");
        Ok(GenericResponse::ok(true))
    }

    /// Deletes a user. An unknown id is raised as `ErrorCode::OfficeNotFound`.
    pub async fn delete(&self, user_id: i32) -> Result<(), UserServiceError> {
        if self.user_repo.get_user(user_id).await?.is_none() {
            tracing::warn!(user_id, "delete of unknown user");
            return Err(UserServiceError::not_found());
        }

        self.user_repo
            .delete_user(user_id)
            .await
            .map_err(UserServiceError::from)?;

        tracing::info!(user_id, "user deleted");
        Ok(())
    }

    pub async fn find_roles(
        &self,
        request: PaginatedRequest,
    ) -> Result<PaginatedResponse<Role>, UserServiceError> {
        let request = request.normalized();
        let (role_rows, total) = self.role_repo.get_roles_paginated(request).await?;
        Ok(PaginatedResponse {
            data: role_rows.into_iter().map(role_from_row).collect(),
            limit: request.limit,
            offset: request.offset,
            total,
        })
    }
}
