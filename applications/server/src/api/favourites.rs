/// Favourites API routes
///
/// All routes sit behind the auth middleware and act on the caller's own list.
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use fave_core::ItemId;

/// GET /api/user/favourites
pub async fn get_favourites(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<ItemId>>> {
    let favourites = app_state.favourites.get_favourites(auth.user_id()).await?;
    Ok(Json(favourites))
}

/// PUT /api/user/favourites/:id
/// Add an item; adding one that is already present changes nothing
pub async fn add_favourite(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<ItemId>>> {
    let favourites = app_state
        .favourites
        .add_favourite(auth.user_id(), &ItemId::new(id))
        .await?;
    Ok(Json(favourites))
}

/// DELETE /api/user/favourites/:id
/// Remove an item; removing one that is absent changes nothing
pub async fn remove_favourite(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<ItemId>>> {
    let favourites = app_state
        .favourites
        .remove_favourite(auth.user_id(), &ItemId::new(id))
        .await?;
    Ok(Json(favourites))
}
