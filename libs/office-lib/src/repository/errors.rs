#[derive(Debug)]
pub enum UserRepositoryError {
    UsernameAlreadyExists,
    EmailAlreadyExists,
    RoleNotFound,
    NotFound,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRepositoryError::UsernameAlreadyExists => write!(f, "username already exists"),
            UserRepositoryError::EmailAlreadyExists => write!(f, "email already exists"),
            UserRepositoryError::RoleNotFound => write!(f, "role not found"),
            UserRepositoryError::NotFound => write!(f, "not found"),
            UserRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for UserRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UserRepositoryError::Sqlx(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for UserRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

const INTEGRITY_CONSTRAINT_VIOLATION: &str = "23000";

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = &msg_lower[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Classifies integrity violations raised by MySQL.
///
/// Duplicate entries are matched on the named unique constraints of the
/// schema; MySQL may prefix the key with the table name
/// (`users.user_email_unique`). A foreign key failure on `user_roles` means a
/// referenced role does not exist.
pub fn map_sqlx_error(err: sqlx::Error) -> UserRepositoryError {
    const USER_USERNAME_UNIQUE: &str = "user_username_unique";
    const USER_EMAIL_UNIQUE: &str = "user_email_unique";
    const USER_ROLES_ROLE_FK: &str = "user_roles_role_fk";

    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() != Some(INTEGRITY_CONSTRAINT_VIOLATION) {
            return UserRepositoryError::Sqlx(err);
        }

        let msg = db_err.message().to_lowercase();

        if msg.contains("duplicate entry") && msg.contains("for key") {
            let key = extract_mysql_key_name(&msg).unwrap_or_default();

            if key.ends_with(USER_USERNAME_UNIQUE) || msg.contains(USER_USERNAME_UNIQUE) {
                return UserRepositoryError::UsernameAlreadyExists;
            }

            if key.ends_with(USER_EMAIL_UNIQUE) || msg.contains(USER_EMAIL_UNIQUE) {
                return UserRepositoryError::EmailAlreadyExists;
            }
        }

        if msg.contains("foreign key constraint fails") && msg.contains(USER_ROLES_ROLE_FK) {
            return UserRepositoryError::RoleNotFound;
        }
    }

    UserRepositoryError::Sqlx(err)
}
