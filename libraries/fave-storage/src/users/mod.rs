//! User records and credential lookups

use crate::error::{Result, StorageError};
use fave_core::types::{NewUser, User, UserCredentials, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Insert a new user
///
/// # Errors
///
/// Returns `StorageError::Duplicate` if the username is already taken
pub async fn create(pool: &SqlitePool, new_user: NewUser) -> Result<User> {
    let user = User::new(new_user.username);

    let result = sqlx::query(
        "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&new_user.password_hash)
    .bind(user.created_at.timestamp())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
            StorageError::Duplicate(format!("username {}", user.username)),
        ),
        Err(e) => Err(e.into()),
    }
}

/// Get a user and its password hash by username
pub async fn find_credentials_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserCredentials>> {
    let row = sqlx::query(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    row.map(|row| -> Result<UserCredentials> {
        Ok(UserCredentials {
            user: user_from_row(&row)?,
            password_hash: row.try_get("password_hash")?,
        })
    })
    .transpose()
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, created_at FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let created_at = chrono::DateTime::from_timestamp(row.try_get::<i64, _>("created_at")?, 0)
        .ok_or_else(|| StorageError::Query("Invalid timestamp".to_string()))?;

    Ok(User::with_id(
        row.try_get::<UserId, _>("id")?,
        row.try_get::<String, _>("username")?,
        created_at,
    ))
}
