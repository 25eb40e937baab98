use async_trait::async_trait;
use sqlx::{query_as, query_scalar, MySql, MySqlPool, QueryBuilder};

use crate::entities::PaginatedRequest;
use crate::repository::errors::{map_sqlx_error, UserRepositoryError};
use crate::repository::models::{RoleRow, UserRoleMapping};
use crate::repository::traits::RoleRepositoryTrait;

#[derive(Debug, Clone)]
pub struct RoleRepository {
    pub pool: MySqlPool,
}

impl RoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepositoryTrait for RoleRepository {
    async fn get_role(&self, role_id: i32) -> Result<Option<RoleRow>, UserRepositoryError> {
        let role = query_as::<_, RoleRow>(
            r#"
            SELECT id, name FROM roles WHERE id = ?
            "#
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(role)
    }

    async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<RoleRow>, UserRepositoryError> {
        let roles = query_as::<_, RoleRow>(
            r#"
            SELECT r.id, r.name
            FROM roles r
            INNER JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = ?
            ORDER BY r.id
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(roles)
    }

    async fn get_roles_for_users(&self, user_ids: &[i32]) -> Result<Vec<UserRoleMapping>, UserRepositoryError> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            r#"
            SELECT ur.user_id, r.id AS role_id, r.name AS role_name
            FROM roles r
            INNER JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id IN ("#,
        );
        let mut separated = builder.separated(", ");
        for user_id in user_ids {
            separated.push_bind(*user_id);
        }
        separated.push_unseparated(") ORDER BY ur.user_id, r.id");

        let mappings = builder
            .build_query_as::<UserRoleMapping>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(mappings)
    }

    async fn get_roles_paginated(&self, request: PaginatedRequest) -> Result<(Vec<RoleRow>, u64), UserRepositoryError> {
        let roles = query_as::<_, RoleRow>(
            r#"
            SELECT id, name FROM roles
            ORDER BY id
            LIMIT ? OFFSET ?
            "#
        )
        .bind(request.limit)
        .bind(request.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let total: i64 = query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok((roles, u64::try_from(total).unwrap_or_default()))
    }
}
