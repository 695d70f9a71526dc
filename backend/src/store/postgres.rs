//! PostgreSQL store backed by sqlx

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::time::Duration;
use uuid::Uuid;

use shared::seed::{CropSeed, RegionSeed, SoilTypeSeed};
use shared::{
    Crop, CropAdvice, CropRecommendation, ForecastDay, NewRecommendation, NewWeatherSnapshot,
    RecommendationDetail, Region, SoilType, UpsertUser, User, WeatherSnapshot,
};

use super::Store;
use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

const USER_COLUMNS: &str = "id, email, first_name, last_name, profile_image_url, \
     selected_region_id, selected_soil_type_id, created_at, updated_at";

const CROP_COLUMNS: &str = "id, name, season, description, expected_yield, duration_days, \
     water_requirement, compatible_soils, image_url, created_at";

const RECOMMENDATION_COLUMNS: &str = "id, user_id, crop_id, region_id, soil_type_id, \
     compatibility_score, advice, created_at";

const WEATHER_COLUMNS: &str = "id, region_id, temperature, humidity, wind_speed, visibility, \
     condition, forecast, last_updated";

// Seeding statements. The no-op `DO UPDATE` makes a conflicting insert wait
// for the competing transaction and then return the committed row, so
// concurrent seeders always get a row back. Existing values are kept.

const ENSURE_REGION: &str = r#"
    INSERT INTO regions (name, code)
    VALUES ($1, $2)
    ON CONFLICT (code) DO UPDATE SET code = EXCLUDED.code
    RETURNING id, name, code, created_at
"#;

const ENSURE_SOIL_TYPE: &str = r#"
    INSERT INTO soil_types (region_id, name, description, ph_range, characteristics)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (region_id, name) DO UPDATE SET name = EXCLUDED.name
    RETURNING id, region_id, name, description, ph_range, characteristics, created_at
"#;

fn ensure_crop_sql() -> String {
    format!(
        r#"
        INSERT INTO crops (
            name, season, description, expected_yield, duration_days,
            water_requirement, compatible_soils, image_url
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING {}
        "#,
        CROP_COLUMNS
    )
}

/// Store over a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open a connection pool for the configured database
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.url)
            .await?;
        Ok(Self::new(db))
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    profile_image_url: Option<String>,
    selected_region_id: Option<i32>,
    selected_soil_type_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            profile_image_url: row.profile_image_url,
            selected_region_id: row.selected_region_id,
            selected_soil_type_id: row.selected_soil_type_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct RegionRow {
    id: i32,
    name: String,
    code: String,
    created_at: DateTime<Utc>,
}

impl From<RegionRow> for Region {
    fn from(row: RegionRow) -> Self {
        Region {
            id: row.id,
            name: row.name,
            code: row.code,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SoilTypeRow {
    id: i32,
    region_id: i32,
    name: String,
    description: String,
    ph_range: String,
    characteristics: String,
    created_at: DateTime<Utc>,
}

impl From<SoilTypeRow> for SoilType {
    fn from(row: SoilTypeRow) -> Self {
        SoilType {
            id: row.id,
            region_id: row.region_id,
            name: row.name,
            description: row.description,
            ph_range: row.ph_range,
            characteristics: row.characteristics,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CropRow {
    id: i32,
    name: String,
    season: String,
    description: String,
    expected_yield: String,
    duration_days: i32,
    water_requirement: String,
    compatible_soils: Vec<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CropRow> for Crop {
    type Error = AppError;

    fn try_from(row: CropRow) -> Result<Self, Self::Error> {
        Ok(Crop {
            id: row.id,
            season: row
                .season
                .parse()
                .map_err(|e| AppError::Internal(format!("crop {}: {}", row.id, e)))?,
            name: row.name,
            description: row.description,
            expected_yield: row.expected_yield,
            duration_days: row.duration_days,
            water_requirement: row.water_requirement,
            compatible_soils: row.compatible_soils,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct RecommendationRow {
    id: Uuid,
    user_id: String,
    crop_id: i32,
    region_id: i32,
    soil_type_id: i32,
    compatibility_score: i32,
    advice: Json<CropAdvice>,
    created_at: DateTime<Utc>,
}

impl From<RecommendationRow> for CropRecommendation {
    fn from(row: RecommendationRow) -> Self {
        CropRecommendation {
            id: row.id,
            user_id: row.user_id,
            crop_id: row.crop_id,
            region_id: row.region_id,
            soil_type_id: row.soil_type_id,
            compatibility_score: row.compatibility_score,
            advice: row.advice.0,
            created_at: row.created_at,
        }
    }
}

/// Flattened join of a recommendation with its crop, region and soil type
#[derive(Debug, FromRow)]
struct RecommendationDetailRow {
    #[sqlx(flatten)]
    recommendation: RecommendationRow,
    crop_name: String,
    crop_season: String,
    crop_description: String,
    crop_expected_yield: String,
    crop_duration_days: i32,
    crop_water_requirement: String,
    crop_compatible_soils: Vec<String>,
    crop_image_url: Option<String>,
    crop_created_at: DateTime<Utc>,
    region_name: String,
    region_code: String,
    region_created_at: DateTime<Utc>,
    soil_name: String,
    soil_description: String,
    soil_ph_range: String,
    soil_characteristics: String,
    soil_created_at: DateTime<Utc>,
}

impl TryFrom<RecommendationDetailRow> for RecommendationDetail {
    type Error = AppError;

    fn try_from(row: RecommendationDetailRow) -> Result<Self, Self::Error> {
        let recommendation = CropRecommendation::from(row.recommendation);
        let crop = Crop::try_from(CropRow {
            id: recommendation.crop_id,
            name: row.crop_name,
            season: row.crop_season,
            description: row.crop_description,
            expected_yield: row.crop_expected_yield,
            duration_days: row.crop_duration_days,
            water_requirement: row.crop_water_requirement,
            compatible_soils: row.crop_compatible_soils,
            image_url: row.crop_image_url,
            created_at: row.crop_created_at,
        })?;
        let region = Region {
            id: recommendation.region_id,
            name: row.region_name,
            code: row.region_code,
            created_at: row.region_created_at,
        };
        let soil_type = SoilType {
            id: recommendation.soil_type_id,
            region_id: recommendation.region_id,
            name: row.soil_name,
            description: row.soil_description,
            ph_range: row.soil_ph_range,
            characteristics: row.soil_characteristics,
            created_at: row.soil_created_at,
        };

        Ok(RecommendationDetail {
            recommendation,
            crop,
            region,
            soil_type,
        })
    }
}

#[derive(Debug, FromRow)]
struct WeatherRow {
    id: Uuid,
    region_id: i32,
    temperature: i32,
    humidity: i32,
    wind_speed: i32,
    visibility: i32,
    condition: String,
    forecast: Json<Vec<ForecastDay>>,
    last_updated: DateTime<Utc>,
}

impl TryFrom<WeatherRow> for WeatherSnapshot {
    type Error = AppError;

    fn try_from(row: WeatherRow) -> Result<Self, Self::Error> {
        Ok(WeatherSnapshot {
            id: row.id,
            region_id: row.region_id,
            temperature: row.temperature,
            humidity: row.humidity,
            wind_speed: row.wind_speed,
            visibility: row.visibility,
            condition: row
                .condition
                .parse()
                .map_err(|e| AppError::Internal(format!("weather {}: {}", row.id, e)))?,
            forecast: row.forecast.0,
            last_updated: row.last_updated,
        })
    }
}

// ============================================================================
// Store implementation
// ============================================================================

#[axum::async_trait]
impl Store for PgStore {
    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user.map(User::from))
    }

    async fn upsert_user(&self, user: UpsertUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                profile_image_url = EXCLUDED.profile_image_url,
                updated_at = NOW()
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_image_url)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn list_regions(&self) -> AppResult<Vec<Region>> {
        let rows = sqlx::query_as::<_, RegionRow>(
            "SELECT id, name, code, created_at FROM regions ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Region::from).collect())
    }

    async fn get_region(&self, id: i32) -> AppResult<Option<Region>> {
        let row = sqlx::query_as::<_, RegionRow>(
            "SELECT id, name, code, created_at FROM regions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Region::from))
    }

    async fn list_soil_types(&self, region_id: i32) -> AppResult<Vec<SoilType>> {
        let rows = sqlx::query_as::<_, SoilTypeRow>(
            r#"
            SELECT id, region_id, name, description, ph_range, characteristics, created_at
            FROM soil_types
            WHERE region_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(region_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SoilType::from).collect())
    }

    async fn get_soil_type(&self, id: i32) -> AppResult<Option<SoilType>> {
        let row = sqlx::query_as::<_, SoilTypeRow>(
            r#"
            SELECT id, region_id, name, description, ph_range, characteristics, created_at
            FROM soil_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SoilType::from))
    }

    async fn list_crops(&self) -> AppResult<Vec<Crop>> {
        let rows = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {} FROM crops ORDER BY id ASC",
            CROP_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Crop::try_from).collect()
    }

    async fn ensure_region(&self, seed: &RegionSeed) -> AppResult<Region> {
        let row = sqlx::query_as::<_, RegionRow>(ENSURE_REGION)
            .bind(seed.name)
            .bind(seed.code)
            .fetch_one(&self.db)
            .await?;

        Ok(row.into())
    }

    async fn ensure_soil_type(&self, region_id: i32, seed: &SoilTypeSeed) -> AppResult<SoilType> {
        let row = sqlx::query_as::<_, SoilTypeRow>(ENSURE_SOIL_TYPE)
            .bind(region_id)
            .bind(seed.name)
            .bind(seed.description)
            .bind(seed.ph_range)
            .bind(seed.characteristics)
            .fetch_one(&self.db)
            .await?;

        Ok(row.into())
    }

    async fn ensure_crop(&self, seed: &CropSeed) -> AppResult<Crop> {
        let compatible_soils: Vec<String> =
            seed.compatible_soils.iter().map(|s| s.to_string()).collect();

        let row = sqlx::query_as::<_, CropRow>(&ensure_crop_sql())
            .bind(seed.name)
            .bind(seed.season.as_str())
            .bind(seed.description)
            .bind(seed.expected_yield)
            .bind(seed.duration_days)
            .bind(seed.water_requirement)
            .bind(&compatible_soils)
            .bind(seed.image_url)
            .fetch_one(&self.db)
            .await?;

        row.try_into()
    }

    async fn replace_recommendations(
        &self,
        user_id: &str,
        recommendations: Vec<NewRecommendation>,
    ) -> AppResult<Vec<CropRecommendation>> {
        let mut tx = self.db.begin().await?;

        // Serialize regenerations for the same user on the user row
        let locked = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            return Err(AppError::NotFound("User".to_string()));
        }

        let stored = write_recommendations(&mut tx, user_id, recommendations).await?;
        tx.commit().await?;

        Ok(stored)
    }

    async fn save_selection(
        &self,
        user_id: &str,
        region_id: i32,
        soil_type_id: i32,
        recommendations: Vec<NewRecommendation>,
    ) -> AppResult<(User, Vec<CropRecommendation>)> {
        let mut tx = self.db.begin().await?;

        // The UPDATE takes the same row lock as a plain regeneration
        let user = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET selected_region_id = $2, selected_soil_type_id = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(region_id)
        .bind(soil_type_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let stored = write_recommendations(&mut tx, user_id, recommendations).await?;
        tx.commit().await?;

        Ok((user.into(), stored))
    }

    async fn list_recommendations(&self, user_id: &str) -> AppResult<Vec<RecommendationDetail>> {
        let rows = sqlx::query_as::<_, RecommendationDetailRow>(
            r#"
            SELECT cr.id, cr.user_id, cr.crop_id, cr.region_id, cr.soil_type_id,
                   cr.compatibility_score, cr.advice, cr.created_at,
                   c.name AS crop_name, c.season AS crop_season,
                   c.description AS crop_description, c.expected_yield AS crop_expected_yield,
                   c.duration_days AS crop_duration_days,
                   c.water_requirement AS crop_water_requirement,
                   c.compatible_soils AS crop_compatible_soils, c.image_url AS crop_image_url,
                   c.created_at AS crop_created_at,
                   r.name AS region_name, r.code AS region_code, r.created_at AS region_created_at,
                   s.name AS soil_name, s.description AS soil_description,
                   s.ph_range AS soil_ph_range, s.characteristics AS soil_characteristics,
                   s.created_at AS soil_created_at
            FROM crop_recommendations cr
            JOIN crops c ON c.id = cr.crop_id
            JOIN regions r ON r.id = cr.region_id
            JOIN soil_types s ON s.id = cr.soil_type_id
            WHERE cr.user_id = $1
            ORDER BY cr.compatibility_score DESC, c.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(RecommendationDetail::try_from).collect()
    }

    async fn get_weather(&self, region_id: i32) -> AppResult<Option<WeatherSnapshot>> {
        let row = sqlx::query_as::<_, WeatherRow>(&format!(
            "SELECT {} FROM weather_snapshots WHERE region_id = $1",
            WEATHER_COLUMNS
        ))
        .bind(region_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(WeatherSnapshot::try_from).transpose()
    }

    async fn put_weather(&self, snapshot: NewWeatherSnapshot) -> AppResult<WeatherSnapshot> {
        let row = sqlx::query_as::<_, WeatherRow>(&format!(
            r#"
            INSERT INTO weather_snapshots (
                id, region_id, temperature, humidity, wind_speed, visibility,
                condition, forecast, last_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (region_id) DO UPDATE SET
                temperature = EXCLUDED.temperature,
                humidity = EXCLUDED.humidity,
                wind_speed = EXCLUDED.wind_speed,
                visibility = EXCLUDED.visibility,
                condition = EXCLUDED.condition,
                forecast = EXCLUDED.forecast,
                last_updated = EXCLUDED.last_updated
            RETURNING {}
            "#,
            WEATHER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(snapshot.region_id)
        .bind(snapshot.temperature)
        .bind(snapshot.humidity)
        .bind(snapshot.wind_speed)
        .bind(snapshot.visibility)
        .bind(snapshot.condition.as_str())
        .bind(Json(&snapshot.forecast))
        .bind(snapshot.last_updated)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}

/// Delete the user's recommendations and insert the new set inside `tx`.
/// The caller holds the user row lock.
async fn write_recommendations(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &str,
    recommendations: Vec<NewRecommendation>,
) -> AppResult<Vec<CropRecommendation>> {
    sqlx::query("DELETE FROM crop_recommendations WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    let mut stored = Vec::with_capacity(recommendations.len());
    for rec in recommendations {
        let row = sqlx::query_as::<_, RecommendationRow>(&format!(
            r#"
            INSERT INTO crop_recommendations (
                id, user_id, crop_id, region_id, soil_type_id, compatibility_score, advice
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, crop_id) DO UPDATE SET
                region_id = EXCLUDED.region_id,
                soil_type_id = EXCLUDED.soil_type_id,
                compatibility_score = EXCLUDED.compatibility_score,
                advice = EXCLUDED.advice,
                created_at = NOW()
            RETURNING {}
            "#,
            RECOMMENDATION_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(rec.crop_id)
        .bind(rec.region_id)
        .bind(rec.soil_type_id)
        .bind(rec.compatibility_score)
        .bind(Json(&rec.advice))
        .fetch_one(&mut **tx)
        .await?;

        stored.push(row.into());
    }

    Ok(stored)
}
