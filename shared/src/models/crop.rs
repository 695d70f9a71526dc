//! Crop models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A crop with its agronomic profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: i32,
    pub name: String,
    pub season: Season,
    pub description: String,
    pub expected_yield: String,
    pub duration_days: i32,
    pub water_requirement: String,
    /// Names of the soil types this crop grows well in
    pub compatible_soils: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Crop {
    /// Exact, case-sensitive match against the soil type's name
    pub fn is_compatible_with(&self, soil_name: &str) -> bool {
        self.compatible_soils.iter().any(|s| s == soil_name)
    }
}

/// Indian cropping seasons
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Season {
    /// Monsoon-sown, harvested in autumn
    Kharif,
    /// Winter-sown, harvested in spring
    Rabi,
    /// Occupies the field for more than one season
    Perennial,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Perennial => "Perennial",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown season: {0}")]
pub struct UnknownSeason(pub String);

impl FromStr for Season {
    type Err = UnknownSeason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Kharif" => Ok(Season::Kharif),
            "Rabi" => Ok(Season::Rabi),
            "Perennial" => Ok(Season::Perennial),
            other => Err(UnknownSeason(other.to_string())),
        }
    }
}
