/// Shared application state
use crate::services::{CredentialService, FavouritesService, TokenService};
use fave_core::UserStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub tokens: Arc<TokenService>,
    pub favourites: Arc<FavouritesService>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            credentials: Arc::new(CredentialService::new(Arc::clone(&store), bcrypt_cost)),
            tokens,
            favourites: Arc::new(FavouritesService::new(store)),
        }
    }
}
