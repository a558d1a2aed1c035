//! Storage trait for user and favourites persistence

use crate::error::Result;
use crate::types::{ItemId, NewUser, User, UserCredentials, UserId};
use async_trait::async_trait;

/// Persistence collaborator used by the credential and favourites services
///
/// Implementations own their concurrency control: `add_favourite` and
/// `remove_favourite` must be atomic per user so concurrent requests never
/// lose an update.
#[async_trait]
pub trait UserStore: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Persist a new user
    ///
    /// Fails with `FaveError::Duplicate` when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Look up a user and its password hash by username
    async fn find_credentials_by_username(&self, username: &str)
        -> Result<Option<UserCredentials>>;

    /// Look up a user by ID
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>>;

    /// Get all users ordered by username
    async fn list_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Favourites
    // ========================================================================

    /// Get a user's favourites in insertion order
    ///
    /// Fails with `FaveError::NotFound` when the user does not exist.
    async fn get_favourites(&self, user_id: &UserId) -> Result<Vec<ItemId>>;

    /// Add an item if absent and return the updated favourites
    async fn add_favourite(&self, user_id: &UserId, item_id: &ItemId) -> Result<Vec<ItemId>>;

    /// Remove an item if present and return the updated favourites
    async fn remove_favourite(&self, user_id: &UserId, item_id: &ItemId) -> Result<Vec<ItemId>>;
}
