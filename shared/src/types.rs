//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// A user's chosen region and soil type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationSelection {
    #[serde(rename = "stateId")]
    pub region_id: i32,
    pub soil_type_id: i32,
}

/// Row counts after a seeding pass
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    #[serde(rename = "states")]
    pub regions: usize,
    pub soil_types: usize,
    pub crops: usize,
}
