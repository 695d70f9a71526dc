//! In-process store for development without a database, and for tests

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use shared::seed::{CropSeed, RegionSeed, SoilTypeSeed};
use shared::{
    Crop, CropRecommendation, NewRecommendation, NewWeatherSnapshot, RecommendationDetail, Region,
    SoilType, UpsertUser, User, WeatherSnapshot,
};

use super::Store;
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    regions: Vec<Region>,
    soil_types: Vec<SoilType>,
    crops: Vec<Crop>,
    recommendations: Vec<CropRecommendation>,
    weather: HashMap<i32, WeatherSnapshot>,
}

impl Tables {
    fn next_id<T>(rows: &[T], id: impl Fn(&T) -> i32) -> i32 {
        rows.iter().map(id).max().unwrap_or(0) + 1
    }

    fn replace_recommendations(
        &mut self,
        user_id: &str,
        recommendations: Vec<NewRecommendation>,
    ) -> Vec<CropRecommendation> {
        self.recommendations.retain(|r| r.user_id != user_id);

        let now = Utc::now();
        let stored: Vec<CropRecommendation> = recommendations
            .into_iter()
            .map(|rec| CropRecommendation {
                id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                crop_id: rec.crop_id,
                region_id: rec.region_id,
                soil_type_id: rec.soil_type_id,
                compatibility_score: rec.compatibility_score,
                advice: rec.advice,
                created_at: now,
            })
            .collect();

        self.recommendations.extend(stored.iter().cloned());
        stored
    }
}

/// Store that keeps every table in memory behind one lock
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

#[axum::async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn upsert_user(&self, user: UpsertUser) -> AppResult<User> {
        let mut tables = self.write()?;
        let now = Utc::now();

        let stored = tables
            .users
            .entry(user.id.clone())
            .and_modify(|existing| {
                existing.email = user.email.clone();
                existing.first_name = user.first_name.clone();
                existing.last_name = user.last_name.clone();
                existing.profile_image_url = user.profile_image_url.clone();
                existing.updated_at = now;
            })
            .or_insert_with(|| User {
                id: user.id.clone(),
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                profile_image_url: user.profile_image_url.clone(),
                selected_region_id: None,
                selected_soil_type_id: None,
                created_at: now,
                updated_at: now,
            });

        Ok(stored.clone())
    }

    async fn list_regions(&self) -> AppResult<Vec<Region>> {
        let mut regions = self.read()?.regions.clone();
        regions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(regions)
    }

    async fn get_region(&self, id: i32) -> AppResult<Option<Region>> {
        Ok(self.read()?.regions.iter().find(|r| r.id == id).cloned())
    }

    async fn list_soil_types(&self, region_id: i32) -> AppResult<Vec<SoilType>> {
        Ok(self
            .read()?
            .soil_types
            .iter()
            .filter(|s| s.region_id == region_id)
            .cloned()
            .collect())
    }

    async fn get_soil_type(&self, id: i32) -> AppResult<Option<SoilType>> {
        Ok(self.read()?.soil_types.iter().find(|s| s.id == id).cloned())
    }

    async fn list_crops(&self) -> AppResult<Vec<Crop>> {
        Ok(self.read()?.crops.clone())
    }

    async fn ensure_region(&self, seed: &RegionSeed) -> AppResult<Region> {
        let mut tables = self.write()?;

        if let Some(existing) = tables.regions.iter().find(|r| r.code == seed.code) {
            return Ok(existing.clone());
        }

        let region = Region {
            id: Tables::next_id(&tables.regions, |r| r.id),
            name: seed.name.to_string(),
            code: seed.code.to_string(),
            created_at: Utc::now(),
        };
        tables.regions.push(region.clone());
        Ok(region)
    }

    async fn ensure_soil_type(&self, region_id: i32, seed: &SoilTypeSeed) -> AppResult<SoilType> {
        let mut tables = self.write()?;

        if !tables.regions.iter().any(|r| r.id == region_id) {
            return Err(AppError::NotFound("State".to_string()));
        }

        if let Some(existing) = tables
            .soil_types
            .iter()
            .find(|s| s.region_id == region_id && s.name == seed.name)
        {
            return Ok(existing.clone());
        }

        let soil_type = SoilType {
            id: Tables::next_id(&tables.soil_types, |s| s.id),
            region_id,
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            ph_range: seed.ph_range.to_string(),
            characteristics: seed.characteristics.to_string(),
            created_at: Utc::now(),
        };
        tables.soil_types.push(soil_type.clone());
        Ok(soil_type)
    }

    async fn ensure_crop(&self, seed: &CropSeed) -> AppResult<Crop> {
        let mut tables = self.write()?;

        if let Some(existing) = tables.crops.iter().find(|c| c.name == seed.name) {
            return Ok(existing.clone());
        }

        let crop = Crop {
            id: Tables::next_id(&tables.crops, |c| c.id),
            name: seed.name.to_string(),
            season: seed.season,
            description: seed.description.to_string(),
            expected_yield: seed.expected_yield.to_string(),
            duration_days: seed.duration_days,
            water_requirement: seed.water_requirement.to_string(),
            compatible_soils: seed.compatible_soils.iter().map(|s| s.to_string()).collect(),
            image_url: seed.image_url.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.crops.push(crop.clone());
        Ok(crop)
    }

    async fn replace_recommendations(
        &self,
        user_id: &str,
        recommendations: Vec<NewRecommendation>,
    ) -> AppResult<Vec<CropRecommendation>> {
        let mut tables = self.write()?;

        if !tables.users.contains_key(user_id) {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(tables.replace_recommendations(user_id, recommendations))
    }

    async fn save_selection(
        &self,
        user_id: &str,
        region_id: i32,
        soil_type_id: i32,
        recommendations: Vec<NewRecommendation>,
    ) -> AppResult<(User, Vec<CropRecommendation>)> {
        // Selection and recommendations change under one write guard
        let mut tables = self.write()?;

        let user = tables
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        user.selected_region_id = Some(region_id);
        user.selected_soil_type_id = Some(soil_type_id);
        user.updated_at = Utc::now();
        let user = user.clone();

        let stored = tables.replace_recommendations(user_id, recommendations);
        Ok((user, stored))
    }

    async fn list_recommendations(&self, user_id: &str) -> AppResult<Vec<RecommendationDetail>> {
        let tables = self.read()?;

        let mut details = Vec::new();
        for rec in tables.recommendations.iter().filter(|r| r.user_id == user_id) {
            let crop = tables.crops.iter().find(|c| c.id == rec.crop_id);
            let region = tables.regions.iter().find(|r| r.id == rec.region_id);
            let soil_type = tables.soil_types.iter().find(|s| s.id == rec.soil_type_id);

            // Inner join semantics: dangling references drop the row
            if let (Some(crop), Some(region), Some(soil_type)) = (crop, region, soil_type) {
                details.push(RecommendationDetail {
                    recommendation: rec.clone(),
                    crop: crop.clone(),
                    region: region.clone(),
                    soil_type: soil_type.clone(),
                });
            }
        }

        details.sort_by(|a, b| {
            b.recommendation
                .compatibility_score
                .cmp(&a.recommendation.compatibility_score)
                .then_with(|| a.crop.name.cmp(&b.crop.name))
        });

        Ok(details)
    }

    async fn get_weather(&self, region_id: i32) -> AppResult<Option<WeatherSnapshot>> {
        Ok(self.read()?.weather.get(&region_id).cloned())
    }

    async fn put_weather(&self, snapshot: NewWeatherSnapshot) -> AppResult<WeatherSnapshot> {
        let mut tables = self.write()?;

        let id = tables
            .weather
            .get(&snapshot.region_id)
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);

        let stored = WeatherSnapshot {
            id,
            region_id: snapshot.region_id,
            temperature: snapshot.temperature,
            humidity: snapshot.humidity,
            wind_speed: snapshot.wind_speed,
            visibility: snapshot.visibility,
            condition: snapshot.condition,
            forecast: snapshot.forecast,
            last_updated: snapshot.last_updated,
        };
        tables.weather.insert(stored.region_id, stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> AppResult<()> {
        self.read().map(|_| ())
    }
}
