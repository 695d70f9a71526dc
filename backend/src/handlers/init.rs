//! Seeding trigger for development and operations

use axum::{extract::State, Json};
use serde::Serialize;

use shared::SeedSummary;

use crate::error::AppResult;
use crate::services::SeedService;
use crate::AppState;

#[derive(Serialize)]
pub struct InitResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: SeedSummary,
}

/// Seed reference data; repeated calls change nothing
/// GET /api/init
pub async fn init_data(State(state): State<AppState>) -> AppResult<Json<InitResponse>> {
    let summary = SeedService::new(state.store).seed().await?;
    Ok(Json(InitResponse {
        message: "Reference data initialized".to_string(),
        summary,
    }))
}
