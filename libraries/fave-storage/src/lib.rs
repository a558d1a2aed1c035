//! Fave Storage
//!
//! `SQLite` persistence for Fave users and their favourites.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature (`users`, `favourites`) owns its own queries
//! - **Atomic Mutations**: favourite add/remove run in a single transaction that
//!   also verifies the user and reads back the updated list
//! - **Trait Boundary**: [`SqliteUserStore`] implements [`fave_core::UserStore`]
//!
//! # Example
//!
//! ```rust,no_run
//! use fave_core::{ItemId, NewUser, UserStore};
//! use fave_storage::{create_pool, run_migrations, SqliteUserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://fave.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteUserStore::new(pool);
//! let user = store
//!     .create_user(NewUser {
//!         username: "alice".to_string(),
//!         password_hash: "$2b$12$...".to_string(),
//!     })
//!     .await?;
//!
//! let favourites = store.add_favourite(&user.id, &ItemId::new("item42")).await?;
//! assert_eq!(favourites.len(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

// Vertical slices
pub mod favourites;
pub mod users;

pub use error::StorageError;
pub use store::SqliteUserStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://fave.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating SQLite pool for {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
