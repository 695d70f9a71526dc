//! HTTP handlers for region and soil type lookups

use axum::{
    extract::{Path, State},
    Json,
};

use shared::{Region, SoilType};

use crate::error::AppResult;
use crate::AppState;

/// List all regions
/// GET /api/states
pub async fn list_states(State(state): State<AppState>) -> AppResult<Json<Vec<Region>>> {
    let regions = state.store.list_regions().await?;
    Ok(Json(regions))
}

/// List the soil types of one region
/// GET /api/soil-types/:state_id
pub async fn list_soil_types(
    State(state): State<AppState>,
    Path(state_id): Path<i32>,
) -> AppResult<Json<Vec<SoilType>>> {
    let soil_types = state.store.list_soil_types(state_id).await?;
    Ok(Json(soil_types))
}
