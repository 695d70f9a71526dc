//! HTTP handlers for the current user's profile

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use shared::User;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::user::{UpdateLocationInput, UserService};
use crate::AppState;

/// Current user's profile, created on first request after sign-in
/// GET /api/auth/user
pub async fn get_current_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.store);
    let user = service.upsert_from_identity(&current_user.0).await?;
    Ok(Json(user))
}

/// Change the selected region and soil type
/// PATCH /api/user/location
pub async fn update_location(
    State(state): State<AppState>,
    current_user: CurrentUser,
    payload: Result<Json<UpdateLocationInput>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(input) = payload?;
    let service = UserService::new(state.store);
    let user = service.update_location(&current_user.0, input).await?;
    Ok(Json(user))
}
