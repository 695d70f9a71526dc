//! User profile and location selection

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::{parse_location, User};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::services::RecommendationService;
use crate::store::DynStore;

/// User service
#[derive(Clone)]
pub struct UserService {
    store: DynStore,
}

/// Body of `PATCH /api/user/location`; ids arrive as selector strings
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationInput {
    #[validate(length(min = 1, message = "State is required"))]
    pub selected_state: String,
    #[validate(length(min = 1, message = "Soil type is required"))]
    pub selected_soil_type: String,
}

impl UserService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Create the user on first sight, refresh profile fields afterwards
    pub async fn upsert_from_identity(&self, identity: &AuthUser) -> AppResult<User> {
        self.store.upsert_user(identity.to_upsert()).await
    }

    /// Store a new region/soil selection together with freshly generated
    /// recommendations
    ///
    /// Scoring runs before anything is written, so a rejected selection or
    /// a failed regeneration leaves the previous selection in place.
    pub async fn update_location(
        &self,
        identity: &AuthUser,
        input: UpdateLocationInput,
    ) -> AppResult<User> {
        input
            .validate()
            .map_err(|errors| AppError::from_validation(&input, errors))?;

        let selection = parse_location(&input.selected_state, &input.selected_soil_type)
            .map_err(|(field, message)| AppError::validation(field, message))?;

        let mut rng = StdRng::from_entropy();
        let recommendations = RecommendationService::new(self.store.clone())
            .score(selection.region_id, selection.soil_type_id, &mut rng)
            .await?;

        self.upsert_from_identity(identity).await?;

        let (user, stored) = self
            .store
            .save_selection(
                &identity.subject,
                selection.region_id,
                selection.soil_type_id,
                recommendations,
            )
            .await?;

        tracing::info!(
            user_id = %identity.subject,
            region_id = selection.region_id,
            soil_type_id = selection.soil_type_id,
            recommendations = stored.len(),
            "Updated user location"
        );

        Ok(user)
    }
}
