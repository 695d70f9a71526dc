//! Weather service: per-region cached readings with synthetic refresh
//!
//! No external weather source is consulted. A region's snapshot is served
//! as-is while younger than the configured max age, then regenerated from
//! fixed ranges.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use shared::{ForecastDay, NewWeatherSnapshot, WeatherCondition, WeatherSnapshot};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::store::DynStore;

pub const TEMPERATURE_RANGE: RangeInclusive<i32> = 20..=35;
pub const HUMIDITY_RANGE: RangeInclusive<i32> = 40..=80;
pub const WIND_SPEED_RANGE: RangeInclusive<i32> = 5..=15;
pub const VISIBILITY_RANGE: RangeInclusive<i32> = 5..=10;

/// Weather service for serving and refreshing region snapshots
#[derive(Clone)]
pub struct WeatherService {
    store: DynStore,
    max_age: Duration,
}

impl WeatherService {
    pub fn new(store: DynStore, config: &WeatherConfig) -> Self {
        Self {
            store,
            max_age: Duration::minutes(config.max_age_minutes),
        }
    }

    /// Current snapshot for a region, refreshed when stale
    pub async fn get(&self, region_id: i32) -> AppResult<WeatherSnapshot> {
        let mut rng = StdRng::from_entropy();
        self.get_at(region_id, Utc::now(), &mut rng).await
    }

    pub async fn get_at<R: Rng + Send + ?Sized>(
        &self,
        region_id: i32,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> AppResult<WeatherSnapshot> {
        if self.store.get_region(region_id).await?.is_none() {
            return Err(AppError::NotFound("State".to_string()));
        }

        if let Some(snapshot) = self.store.get_weather(region_id).await? {
            if self.is_fresh(&snapshot, now) {
                tracing::debug!(region_id, "Serving cached weather");
                return Ok(snapshot);
            }
        }

        let snapshot = self
            .store
            .put_weather(synthesize(region_id, now, rng))
            .await?;

        tracing::debug!(
            region_id,
            temperature = snapshot.temperature,
            condition = %snapshot.condition,
            "Refreshed weather"
        );

        Ok(snapshot)
    }

    /// A snapshot stamped in the future (clock skew) is treated as stale
    pub fn is_fresh(&self, snapshot: &WeatherSnapshot, now: DateTime<Utc>) -> bool {
        let age = snapshot.age(now);
        age >= Duration::zero() && age < self.max_age
    }
}

/// Draw a reading from the fixed ranges
pub fn synthesize<R: Rng + ?Sized>(
    region_id: i32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> NewWeatherSnapshot {
    let condition = WeatherCondition::ALL[rng.gen_range(0..WeatherCondition::ALL.len())];

    NewWeatherSnapshot {
        region_id,
        temperature: rng.gen_range(TEMPERATURE_RANGE),
        humidity: rng.gen_range(HUMIDITY_RANGE),
        wind_speed: rng.gen_range(WIND_SPEED_RANGE),
        visibility: rng.gen_range(VISIBILITY_RANGE),
        condition,
        forecast: five_day_forecast(),
        last_updated: now,
    }
}

/// The fixed outlook shown on the weather card
pub fn five_day_forecast() -> Vec<ForecastDay> {
    let day = |label: &str, high, low, condition| ForecastDay {
        day: label.to_string(),
        high,
        low,
        condition,
    };

    vec![
        day("Today", 32, 24, WeatherCondition::Sunny),
        day("Tomorrow", 30, 23, WeatherCondition::PartlyCloudy),
        day("Wed", 28, 22, WeatherCondition::LightRain),
        day("Thu", 29, 22, WeatherCondition::Cloudy),
        day("Fri", 31, 23, WeatherCondition::Sunny),
    ]
}
