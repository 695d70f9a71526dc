//! Crop recommendation generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shared::scoring::score_crops;
use shared::{
    validate_compatibility_score, validate_soil_in_region, CropRecommendation, NewRecommendation,
    RecommendationDetail,
};

use crate::error::{AppError, AppResult};
use crate::store::DynStore;

/// Recommendation service
#[derive(Clone)]
pub struct RecommendationService {
    store: DynStore,
}

impl RecommendationService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Score every crop for the selection and replace the user's set
    pub async fn generate(
        &self,
        user_id: &str,
        region_id: i32,
        soil_type_id: i32,
    ) -> AppResult<Vec<CropRecommendation>> {
        let mut rng = StdRng::from_entropy();
        self.generate_with_rng(user_id, region_id, soil_type_id, &mut rng)
            .await
    }

    pub async fn generate_with_rng<R: Rng + Send + ?Sized>(
        &self,
        user_id: &str,
        region_id: i32,
        soil_type_id: i32,
        rng: &mut R,
    ) -> AppResult<Vec<CropRecommendation>> {
        let recommendations = self.score(region_id, soil_type_id, rng).await?;

        let stored = self
            .store
            .replace_recommendations(user_id, recommendations)
            .await?;

        tracing::info!(
            user_id,
            region_id,
            soil_type_id,
            count = stored.len(),
            "Regenerated crop recommendations"
        );

        Ok(stored)
    }

    /// Validate the selection and score every crop for it, without storing
    pub async fn score<R: Rng + Send + ?Sized>(
        &self,
        region_id: i32,
        soil_type_id: i32,
        rng: &mut R,
    ) -> AppResult<Vec<NewRecommendation>> {
        let region = self
            .store
            .get_region(region_id)
            .await?
            .ok_or_else(|| AppError::validation("selectedState", "Unknown state"))?;

        let soil_type = self
            .store
            .get_soil_type(soil_type_id)
            .await?
            .ok_or_else(|| AppError::validation("selectedSoilType", "Unknown soil type"))?;

        validate_soil_in_region(&region, &soil_type)
            .map_err(|e| AppError::validation("selectedSoilType", e))?;

        let crops = self.store.list_crops().await?;
        let recommendations = score_crops(&crops, &soil_type, rng);

        for rec in &recommendations {
            validate_compatibility_score(rec.compatibility_score)
                .map_err(|e| AppError::Internal(format!("crop {}: {}", rec.crop_id, e)))?;
        }

        tracing::debug!(
            region = %region.code,
            soil_type = %soil_type.name,
            crops = crops.len(),
            "Scored crops"
        );

        Ok(recommendations)
    }

    /// Regenerate from the user's stored selection
    pub async fn generate_for_user(&self, user_id: &str) -> AppResult<Vec<CropRecommendation>> {
        let (region_id, soil_type_id) = self
            .store
            .get_user(user_id)
            .await?
            .and_then(|user| user.location())
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Select a state and soil type before generating recommendations".to_string(),
                )
            })?;

        self.generate(user_id, region_id, soil_type_id).await
    }

    pub async fn list(&self, user_id: &str) -> AppResult<Vec<RecommendationDetail>> {
        self.store.list_recommendations(user_id).await
    }
}
