//! HTTP handlers for crop recommendations

use axum::{extract::State, Json};

use shared::{CropRecommendation, RecommendationDetail};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::RecommendationService;
use crate::AppState;

/// The current user's recommendations with crop, state and soil details
/// GET /api/crop-recommendations
pub async fn list_recommendations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<RecommendationDetail>>> {
    let service = RecommendationService::new(state.store);
    let recommendations = service.list(&current_user.0.subject).await?;
    Ok(Json(recommendations))
}

/// Regenerate from the stored selection
/// POST /api/crop-recommendations/generate
pub async fn generate_recommendations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<CropRecommendation>>> {
    let service = RecommendationService::new(state.store);
    let recommendations = service.generate_for_user(&current_user.0.subject).await?;
    Ok(Json(recommendations))
}
