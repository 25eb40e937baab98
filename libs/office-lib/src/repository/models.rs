use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoleRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRoleMapping {
    pub user_id: i32,
    pub role_id: i32,
    pub role_name: String,
}

/// Values inserted for a new user; the id is generated by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub role_ids: Vec<i32>,
}
