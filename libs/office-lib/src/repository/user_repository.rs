use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, MySqlPool};

use crate::entities::PaginatedRequest;
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::{NewUserRow, UserRow};
use crate::repository::traits::UserRepositoryTrait;

/// Builds a `SELECT` over the user columns followed by `$tail`.
macro_rules! select_users {
    ($tail:literal) => {
        concat!("SELECT id, username, email, name, last_name FROM users ", $tail)
    };
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, sql: &'static str, value: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(UserRepositoryError::from)?;

        Ok(user)
    }
}

fn generated_id(last_insert_id: u64) -> Result<i32, UserRepositoryError> {
    i32::try_from(last_insert_id)
        .map_err(|e| UserRepositoryError::Sqlx(sqlx::Error::Decode(Box::new(e))))
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: &NewUserRow) -> Result<UserRow, UserRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(UserRepositoryError::from)?;

        let result = query(
            r#"
            INSERT INTO users (username, email, name, last_name)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.last_name)
        .execute(&mut *tx)
        .await
        .map_err(UserRepositoryError::from)?;

        let user_id = generated_id(result.last_insert_id())?;

        for role_id in &user.role_ids {
            query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                VALUES (?, ?)
                "#
            )
            .bind(user_id)
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(UserRepositoryError::from)?;
        }

        tx.commit().await.map_err(UserRepositoryError::from)?;

        Ok(UserRow {
            id: user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
        })
    }

    async fn get_user(&self, user_id: i32) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(select_users!("WHERE id = ?"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(UserRepositoryError::from)?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        self.fetch_one(select_users!("WHERE username = ?"), username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        self.fetch_one(select_users!("WHERE email = ?"), email).await
    }

    async fn update_user_with_roles(&self, user: &UserRow, role_ids: &[i32]) -> Result<(), UserRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(UserRepositoryError::from)?;

        // existence is checked under a row lock: MySQL rows_affected counts only changed rows
        let locked: Option<i32> = query_scalar("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(user.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(UserRepositoryError::from)?;

        if locked.is_none() {
            return Err(UserRepositoryError::NotFound);
        }

        query(
            r#"
            UPDATE users
            SET username = ?, email = ?, name = ?, last_name = ?
            WHERE id = ?
            "#
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(UserRepositoryError::from)?;

        if !role_ids.is_empty() {
            query("DELETE FROM user_roles WHERE user_id = ?")
                .bind(user.id)
                .execute(&mut *tx)
                .await
                .map_err(UserRepositoryError::from)?;

            for role_id in role_ids {
                query(
                    r#"
                    INSERT INTO user_roles (user_id, role_id)
                    VALUES (?, ?)
                    "#
                )
                .bind(user.id)
                .bind(role_id)
                .execute(&mut *tx)
                .await
                .map_err(UserRepositoryError::from)?;
            }
        }

        tx.commit().await.map_err(UserRepositoryError::from)?;
        Ok(())
    }

    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepositoryError> {
        // user_roles rows go with the user (ON DELETE CASCADE)
        let result = query(
            r#"
            DELETE FROM users WHERE id = ?
            "#
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(UserRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn get_users_paginated(&self, request: PaginatedRequest) -> Result<(Vec<UserRow>, u64), UserRepositoryError> {
        let users = query_as::<_, UserRow>(select_users!("ORDER BY id LIMIT ? OFFSET ?"))
            .bind(request.limit)
            .bind(request.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(UserRepositoryError::from)?;

        let total: i64 = query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(UserRepositoryError::from)?;

        Ok((users, u64::try_from(total).unwrap_or_default()))
    }
}
