//! Per-user favourite item ids
//!
//! Each mutation runs in one transaction: the write goes first so the
//! transaction holds SQLite's write lock before the user check and the
//! read-back. Concurrent add/remove for the same user therefore serialize
//! and never lose an update.

use crate::error::{Result, StorageError};
use fave_core::types::{ItemId, UserId};
use sqlx::{SqliteConnection, SqlitePool};

/// Get a user's favourites in insertion order
///
/// # Errors
///
/// Returns `StorageError::NotFound` if the user does not exist
pub async fn get_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<ItemId>> {
    let mut tx = pool.begin().await?;

    ensure_user(&mut tx, user_id).await?;
    let items = list(&mut tx, user_id).await?;

    tx.commit().await?;
    Ok(items)
}

/// Add an item to a user's favourites, ignoring it if already present
///
/// Returns the updated favourites.
pub async fn add(pool: &SqlitePool, user_id: &UserId, item_id: &ItemId) -> Result<Vec<ItemId>> {
    let mut tx = pool.begin().await?;

    // Inserts nothing when the user is missing; the check below reports it.
    sqlx::query(
        "INSERT INTO user_favourites (user_id, item_id, added_at)
         SELECT id, ?, ? FROM users WHERE id = ?
         ON CONFLICT(user_id, item_id) DO NOTHING",
    )
    .bind(item_id)
    .bind(chrono::Utc::now().timestamp())
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    ensure_user(&mut tx, user_id).await?;
    let items = list(&mut tx, user_id).await?;

    tx.commit().await?;
    Ok(items)
}

/// Remove an item from a user's favourites, ignoring it if absent
///
/// Returns the updated favourites.
pub async fn remove(pool: &SqlitePool, user_id: &UserId, item_id: &ItemId) -> Result<Vec<ItemId>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM user_favourites WHERE user_id = ? AND item_id = ?")
        .bind(user_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    ensure_user(&mut tx, user_id).await?;
    let items = list(&mut tx, user_id).await?;

    tx.commit().await?;
    Ok(items)
}

async fn ensure_user(conn: &mut SqliteConnection, user_id: &UserId) -> Result<()> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(StorageError::not_found("User", user_id.as_str())),
    }
}

async fn list(conn: &mut SqliteConnection, user_id: &UserId) -> Result<Vec<ItemId>> {
    let items = sqlx::query_scalar::<_, ItemId>(
        "SELECT item_id FROM user_favourites WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(items)
}
