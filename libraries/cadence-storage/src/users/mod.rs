//! User management and authentication queries

use crate::error::is_unique_violation;
use cadence_core::{
    error::Result,
    types::{CreateUser, Role, User, UserId},
    CadenceError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: role
            .parse()
            .map_err(|_| CadenceError::storage(format!("Unknown role: {role}")))?,
        created_at: row.get("created_at"),
    })
}

/// Create a new account
///
/// # Errors
///
/// Returns `CadenceError::Duplicate` if the email is already registered
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let id = UserId::generate();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CadenceError::Duplicate("User already exists".to_string())
        } else {
            e.into()
        }
    })?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| CadenceError::storage("Failed to retrieve created user"))
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, email, role, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Look up an account and its password hash by email
///
/// # Returns
///
/// Returns `None` if no account uses this email
pub async fn get_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<(User, String)>> {
    let row = sqlx::query(
        "SELECT id, name, email, role, created_at, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(|row| Ok((user_from_row(&row)?, row.get("password_hash"))))
        .transpose()
}

/// Number of accounts holding `role`
pub async fn count_with_role(pool: &SqlitePool, role: Role) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE role = ?")
        .bind(role.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get("count"))
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, email, role, created_at FROM users ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}
