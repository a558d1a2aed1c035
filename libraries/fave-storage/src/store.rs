use crate::{favourites, users};
use async_trait::async_trait;
use fave_core::{
    error::Result,
    storage::UserStore,
    types::{ItemId, NewUser, User, UserCredentials, UserId},
};
use sqlx::SqlitePool;

/// User store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and bring its schema up to date
    pub async fn connect(database_url: &str) -> std::result::Result<Self, crate::StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    // Users
    async fn create_user(&self, user: NewUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>> {
        Ok(users::find_credentials_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    // Favourites
    async fn get_favourites(&self, user_id: &UserId) -> Result<Vec<ItemId>> {
        Ok(favourites::get_for_user(&self.pool, user_id).await?)
    }

    async fn add_favourite(&self, user_id: &UserId, item_id: &ItemId) -> Result<Vec<ItemId>> {
        Ok(favourites::add(&self.pool, user_id, item_id).await?)
    }

    async fn remove_favourite(&self, user_id: &UserId, item_id: &ItemId) -> Result<Vec<ItemId>> {
        Ok(favourites::remove(&self.pool, user_id, item_id).await?)
    }
}
