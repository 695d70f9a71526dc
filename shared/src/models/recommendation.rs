//! Crop recommendation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Crop, Region, SoilType};

/// Static agronomic advice attached to a recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CropAdvice {
    pub irrigation: String,
    pub fertilizer: String,
    pub pest_control: String,
}

/// A crop scored against a user's region and soil selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub id: Uuid,
    pub user_id: String,
    pub crop_id: i32,
    #[serde(rename = "stateId")]
    pub region_id: i32,
    pub soil_type_id: i32,
    /// 50-99, see [`crate::scoring`]
    pub compatibility_score: i32,
    pub advice: CropAdvice,
    pub created_at: DateTime<Utc>,
}

/// A recommendation ready to be written for a user
#[derive(Debug, Clone)]
pub struct NewRecommendation {
    pub crop_id: i32,
    pub region_id: i32,
    pub soil_type_id: i32,
    pub compatibility_score: i32,
    pub advice: CropAdvice,
}

/// Recommendation joined with the crop, region and soil type it refers to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDetail {
    #[serde(flatten)]
    pub recommendation: CropRecommendation,
    pub crop: Crop,
    #[serde(rename = "state")]
    pub region: Region,
    pub soil_type: SoilType,
}
