//! Route definitions for CropAdviser

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Reference data (public)
        .route("/states", get(handlers::list_states))
        .route("/soil-types/:state_id", get(handlers::list_soil_types))
        // Weather (public)
        .route("/weather/:state_id", get(handlers::get_weather))
        // Seeding trigger (public, development convenience)
        .route("/init", get(handlers::init_data))
        // Protected routes
        .merge(user_routes(state))
}

/// Routes that need a signed-in user
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/user", get(handlers::get_current_user))
        .route("/user/location", patch(handlers::update_location))
        .route("/crop-recommendations", get(handlers::list_recommendations))
        .route(
            "/crop-recommendations/generate",
            post(handlers::generate_recommendations),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
