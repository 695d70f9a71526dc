//! HTTP handlers for weather

use axum::{
    extract::{Path, State},
    Json,
};

use shared::WeatherSnapshot;

use crate::error::AppResult;
use crate::services::WeatherService;
use crate::AppState;

/// Cached or freshly generated weather for a region
/// GET /api/weather/:state_id
pub async fn get_weather(
    State(state): State<AppState>,
    Path(state_id): Path<i32>,
) -> AppResult<Json<WeatherSnapshot>> {
    let service = WeatherService::new(state.store, &state.config.weather);
    let snapshot = service.get(state_id).await?;
    Ok(Json(snapshot))
}
