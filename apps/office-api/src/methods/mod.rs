pub mod create_user;
pub mod delete_user;
pub mod entities;
pub mod get_roles;
pub mod get_user_by_id;
pub mod get_users;
pub mod health_check;
pub mod routes;
pub mod update_user;

/// Parses a user id path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<i32, crate::error::ApiError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(crate::error::ApiError::invalid_id)
}
