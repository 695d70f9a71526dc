//! Persistence layer
//!
//! Handlers receive an `Arc<dyn Store>` through [`crate::AppState`]; the
//! concrete backend is chosen in `main` from configuration.

mod memory;
mod postgres;

use std::sync::Arc;

use shared::seed::{CropSeed, RegionSeed, SoilTypeSeed};
use shared::{
    Crop, CropRecommendation, NewRecommendation, NewWeatherSnapshot, RecommendationDetail, Region,
    SoilType, UpsertUser, User, WeatherSnapshot,
};

use crate::error::AppResult;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Shared handle to the configured store
pub type DynStore = Arc<dyn Store>;

#[axum::async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn get_user(&self, id: &str) -> AppResult<Option<User>>;

    /// Insert the user or refresh its profile fields, leaving the location
    /// selection untouched
    async fn upsert_user(&self, user: UpsertUser) -> AppResult<User>;


    // Reference data
    async fn list_regions(&self) -> AppResult<Vec<Region>>;

    async fn get_region(&self, id: i32) -> AppResult<Option<Region>>;

    async fn list_soil_types(&self, region_id: i32) -> AppResult<Vec<SoilType>>;

    async fn get_soil_type(&self, id: i32) -> AppResult<Option<SoilType>>;

    async fn list_crops(&self) -> AppResult<Vec<Crop>>;

    // Seeding: insert when no row with the same natural key exists, and
    // return the stored row either way
    async fn ensure_region(&self, seed: &RegionSeed) -> AppResult<Region>;

    async fn ensure_soil_type(&self, region_id: i32, seed: &SoilTypeSeed) -> AppResult<SoilType>;

    async fn ensure_crop(&self, seed: &CropSeed) -> AppResult<Crop>;

    // Recommendations

    /// Atomically swap the user's recommendation set for `recommendations`
    async fn replace_recommendations(
        &self,
        user_id: &str,
        recommendations: Vec<NewRecommendation>,
    ) -> AppResult<Vec<CropRecommendation>>;

    /// Store the user's region and soil selection together with the
    /// recommendation set generated for it, as one atomic change
    async fn save_selection(
        &self,
        user_id: &str,
        region_id: i32,
        soil_type_id: i32,
        recommendations: Vec<NewRecommendation>,
    ) -> AppResult<(User, Vec<CropRecommendation>)>;

    /// The user's recommendations with crop, region and soil type, best first
    async fn list_recommendations(&self, user_id: &str) -> AppResult<Vec<RecommendationDetail>>;

    // Weather
    async fn get_weather(&self, region_id: i32) -> AppResult<Option<WeatherSnapshot>>;

    /// Insert or overwrite the region's single snapshot
    async fn put_weather(&self, snapshot: NewWeatherSnapshot) -> AppResult<WeatherSnapshot>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> AppResult<()>;
}
