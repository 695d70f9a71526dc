//! Region and soil type models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A first-level administrative division (an Indian state)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: i32,
    pub name: String,
    /// Short code, e.g. "PB" for Punjab
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// A soil classification found within exactly one region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoilType {
    pub id: i32,
    #[serde(rename = "stateId")]
    pub region_id: i32,
    pub name: String,
    pub description: String,
    pub ph_range: String,
    pub characteristics: String,
    pub created_at: DateTime<Utc>,
}

impl SoilType {
    pub fn belongs_to(&self, region_id: i32) -> bool {
        self.region_id == region_id
    }
}
