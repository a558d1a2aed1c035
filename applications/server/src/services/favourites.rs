/// Favourites service - per-user favourite item ids
use crate::error::{Result, ServerError};
use fave_core::{ItemId, UserId, UserStore};
use std::sync::Arc;

/// Reads and mutates a user's favourites through the store
///
/// Add and remove are idempotent and return the updated list. A user that
/// no longer exists is reported as not found.
pub struct FavouritesService {
    store: Arc<dyn UserStore>,
}

impl FavouritesService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn get_favourites(&self, user_id: &UserId) -> Result<Vec<ItemId>> {
        Ok(self.store.get_favourites(user_id).await?)
    }

    pub async fn add_favourite(&self, user_id: &UserId, item_id: &ItemId) -> Result<Vec<ItemId>> {
        ensure_item(item_id)?;
        let favourites = self.store.add_favourite(user_id, item_id).await?;
        tracing::debug!("User {} favourited {}", user_id, item_id);
        Ok(favourites)
    }

    pub async fn remove_favourite(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> Result<Vec<ItemId>> {
        ensure_item(item_id)?;
        let favourites = self.store.remove_favourite(user_id, item_id).await?;
        tracing::debug!("User {} unfavourited {}", user_id, item_id);
        Ok(favourites)
    }
}

fn ensure_item(item_id: &ItemId) -> Result<()> {
    if item_id.is_blank() {
        return Err(ServerError::Validation("Item id is required".to_string()));
    }
    Ok(())
}
