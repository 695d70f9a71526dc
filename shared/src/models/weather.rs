//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// The cached weather reading for a region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub id: Uuid,
    #[serde(rename = "stateId")]
    pub region_id: i32,
    /// Degrees Celsius
    pub temperature: i32,
    /// Relative humidity, percent
    pub humidity: i32,
    /// km/h
    pub wind_speed: i32,
    /// km
    pub visibility: i32,
    pub condition: WeatherCondition,
    pub forecast: Vec<ForecastDay>,
    pub last_updated: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Age of the reading relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.last_updated
    }
}

/// Values for a new or refreshed snapshot
#[derive(Debug, Clone)]
pub struct NewWeatherSnapshot {
    pub region_id: i32,
    pub temperature: i32,
    pub humidity: i32,
    pub wind_speed: i32,
    pub visibility: i32,
    pub condition: WeatherCondition,
    pub forecast: Vec<ForecastDay>,
    pub last_updated: DateTime<Utc>,
}

/// One day of the short-range forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub day: String,
    pub high: i32,
    pub low: i32,
    pub condition: WeatherCondition,
}

/// Sky conditions reported by the weather cards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Sunny,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
    #[serde(rename = "Light Rain")]
    LightRain,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::PartlyCloudy,
        WeatherCondition::Cloudy,
        WeatherCondition::LightRain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::LightRain => "Light Rain",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown weather condition: {0}")]
pub struct UnknownCondition(pub String);

impl FromStr for WeatherCondition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCondition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_serializes_with_display_label() {
        let json = serde_json::to_string(&WeatherCondition::PartlyCloudy).unwrap();
        assert_eq!(json, "\"Partly Cloudy\"");
        assert_eq!(
            "Light Rain".parse::<WeatherCondition>().unwrap(),
            WeatherCondition::LightRain
        );
        assert!("Hail".parse::<WeatherCondition>().is_err());
    }
}
