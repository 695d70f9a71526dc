//! Reference data seeding

use shared::seed::{CropSeed, RegionSeed, CROPS, REGIONS};
use shared::SeedSummary;

use crate::error::AppResult;
use crate::store::DynStore;

/// Populates regions, soil types and crops from the canonical tables
#[derive(Clone)]
pub struct SeedService {
    store: DynStore,
    regions: &'static [RegionSeed],
    crops: &'static [CropSeed],
}

impl SeedService {
    pub fn new(store: DynStore) -> Self {
        Self::with_tables(store, REGIONS, CROPS)
    }

    pub fn with_tables(
        store: DynStore,
        regions: &'static [RegionSeed],
        crops: &'static [CropSeed],
    ) -> Self {
        Self {
            store,
            regions,
            crops,
        }
    }

    /// Insert whatever reference rows are missing; safe to call repeatedly
    pub async fn seed(&self) -> AppResult<SeedSummary> {
        let mut summary = SeedSummary::default();

        for region_seed in self.regions {
            let region = self.store.ensure_region(region_seed).await?;
            summary.regions += 1;

            for soil_seed in region_seed.soil_types {
                self.store.ensure_soil_type(region.id, soil_seed).await?;
                summary.soil_types += 1;
            }
        }

        for crop_seed in self.crops {
            self.store.ensure_crop(crop_seed).await?;
            summary.crops += 1;
        }

        tracing::info!(
            regions = summary.regions,
            soil_types = summary.soil_types,
            crops = summary.crops,
            "Reference data seeded"
        );

        Ok(summary)
    }
}
