/// HTTP router
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router
///
/// Favourites routes are wrapped in the bearer-token middleware; register,
/// login and health are public.
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/user/register", post(api::users::register))
        .route("/user/login", post(api::users::login));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/user/favourites", get(api::favourites::get_favourites))
        .route(
            "/user/favourites/:id",
            put(api::favourites::add_favourite).delete(api::favourites::remove_favourite),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.tokens),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
