//! Canonical reference data: regions with their soil profiles, and crops
//!
//! This is the only copy of the seed tables. The backend seeder walks these
//! slices and inserts whatever is missing.

use crate::models::Season;

/// A region and the soil types found in it
#[derive(Debug, Clone, Copy)]
pub struct RegionSeed {
    pub name: &'static str,
    pub code: &'static str,
    pub soil_types: &'static [SoilTypeSeed],
}

#[derive(Debug, Clone, Copy)]
pub struct SoilTypeSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub ph_range: &'static str,
    pub characteristics: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct CropSeed {
    pub name: &'static str,
    pub season: Season,
    pub description: &'static str,
    pub expected_yield: &'static str,
    pub duration_days: i32,
    pub water_requirement: &'static str,
    pub compatible_soils: &'static [&'static str],
    pub image_url: Option<&'static str>,
}

const ALLUVIAL: SoilTypeSeed = SoilTypeSeed {
    name: "Alluvial Soil",
    description: "Deposited by rivers, rich in potash and lime, the most widespread soil of the northern plains",
    ph_range: "6.5-8.0",
    characteristics: "Fertile, well-drained, good water retention",
};

const SANDY_LOAM: SoilTypeSeed = SoilTypeSeed {
    name: "Sandy Loam",
    description: "Light soil with a high sand fraction and moderate organic matter",
    ph_range: "6.0-7.5",
    characteristics: "Warms quickly, drains fast, needs frequent irrigation",
};

const CLAY_LOAM: SoilTypeSeed = SoilTypeSeed {
    name: "Clay Loam",
    description: "Heavy soil balancing clay, silt and sand",
    ph_range: "6.0-7.8",
    characteristics: "High nutrient holding, slow drainage, prone to compaction",
};

const LOAMY: SoilTypeSeed = SoilTypeSeed {
    name: "Loamy Soil",
    description: "Even mix of sand, silt and clay with good humus content",
    ph_range: "6.0-7.0",
    characteristics: "Friable, retains moisture without waterlogging",
};

const BLACK: SoilTypeSeed = SoilTypeSeed {
    name: "Black Soil",
    description: "Regur soil formed from basalt, rich in iron, lime and magnesium",
    ph_range: "7.5-8.5",
    characteristics: "High moisture retention, swells when wet and cracks when dry",
};

const RED: SoilTypeSeed = SoilTypeSeed {
    name: "Red Soil",
    description: "Formed from crystalline rocks, red from iron oxide",
    ph_range: "5.5-7.0",
    characteristics: "Porous, low in nitrogen and humus, responds well to fertilizer",
};

const LATERITE: SoilTypeSeed = SoilTypeSeed {
    name: "Laterite Soil",
    description: "Leached soil of high-rainfall areas, rich in iron and aluminium",
    ph_range: "4.5-6.0",
    characteristics: "Acidic, low fertility, hardens on exposure",
};

const DESERT: SoilTypeSeed = SoilTypeSeed {
    name: "Desert Soil",
    description: "Arid sandy soil with high soluble salt content",
    ph_range: "7.0-8.5",
    characteristics: "Low organic matter, poor water retention",
};

pub const REGIONS: &[RegionSeed] = &[
    RegionSeed {
        name: "Punjab",
        code: "PB",
        soil_types: &[ALLUVIAL, SANDY_LOAM],
    },
    RegionSeed {
        name: "Haryana",
        code: "HR",
        soil_types: &[ALLUVIAL, LOAMY],
    },
    RegionSeed {
        name: "Uttar Pradesh",
        code: "UP",
        soil_types: &[ALLUVIAL, CLAY_LOAM],
    },
    RegionSeed {
        name: "Maharashtra",
        code: "MH",
        soil_types: &[BLACK, RED],
    },
    RegionSeed {
        name: "Karnataka",
        code: "KA",
        soil_types: &[RED, LATERITE],
    },
    RegionSeed {
        name: "Rajasthan",
        code: "RJ",
        soil_types: &[DESERT, SANDY_LOAM],
    },
    RegionSeed {
        name: "West Bengal",
        code: "WB",
        soil_types: &[ALLUVIAL, LATERITE],
    },
    RegionSeed {
        name: "Tamil Nadu",
        code: "TN",
        soil_types: &[RED, BLACK],
    },
    RegionSeed {
        name: "Gujarat",
        code: "GJ",
        soil_types: &[BLACK, SANDY_LOAM],
    },
];

pub const CROPS: &[CropSeed] = &[
    CropSeed {
        name: "Rice",
        season: Season::Kharif,
        description: "Staple cereal grown in standing water during the monsoon",
        expected_yield: "40-50 quintals/hectare",
        duration_days: 120,
        water_requirement: "High",
        compatible_soils: &["Alluvial Soil", "Clay Loam", "Laterite Soil"],
        image_url: Some("/images/crops/rice.jpg"),
    },
    CropSeed {
        name: "Wheat",
        season: Season::Rabi,
        description: "Winter cereal and the main food grain of the northern plains",
        expected_yield: "45-55 quintals/hectare",
        duration_days: 140,
        water_requirement: "Medium",
        compatible_soils: &["Alluvial Soil", "Loamy Soil", "Clay Loam", "Black Soil"],
        image_url: Some("/images/crops/wheat.jpg"),
    },
    CropSeed {
        name: "Cotton",
        season: Season::Kharif,
        description: "Fibre crop suited to warm climates and moisture-retentive soils",
        expected_yield: "15-20 quintals/hectare",
        duration_days: 180,
        water_requirement: "Medium",
        compatible_soils: &["Black Soil", "Red Soil", "Alluvial Soil"],
        image_url: Some("/images/crops/cotton.jpg"),
    },
    CropSeed {
        name: "Sugarcane",
        season: Season::Perennial,
        description: "Long-duration cash crop grown for sugar and jaggery",
        expected_yield: "700-800 quintals/hectare",
        duration_days: 365,
        water_requirement: "High",
        compatible_soils: &["Alluvial Soil", "Black Soil", "Loamy Soil"],
        image_url: Some("/images/crops/sugarcane.jpg"),
    },
    CropSeed {
        name: "Maize",
        season: Season::Kharif,
        description: "Versatile cereal used for food, feed and starch",
        expected_yield: "30-40 quintals/hectare",
        duration_days: 100,
        water_requirement: "Medium",
        compatible_soils: &["Alluvial Soil", "Red Soil", "Sandy Loam", "Loamy Soil"],
        image_url: Some("/images/crops/maize.jpg"),
    },
    CropSeed {
        name: "Mustard",
        season: Season::Rabi,
        description: "Oilseed crop tolerant of cool, dry winters",
        expected_yield: "12-15 quintals/hectare",
        duration_days: 110,
        water_requirement: "Low",
        compatible_soils: &["Sandy Loam", "Alluvial Soil", "Desert Soil"],
        image_url: None,
    },
    CropSeed {
        name: "Chickpea",
        season: Season::Rabi,
        description: "Pulse crop that fixes nitrogen and needs little irrigation",
        expected_yield: "10-15 quintals/hectare",
        duration_days: 100,
        water_requirement: "Low",
        compatible_soils: &["Black Soil", "Sandy Loam", "Loamy Soil"],
        image_url: None,
    },
    CropSeed {
        name: "Groundnut",
        season: Season::Kharif,
        description: "Oilseed legume that pegs its pods into loose soil",
        expected_yield: "15-20 quintals/hectare",
        duration_days: 110,
        water_requirement: "Low",
        compatible_soils: &["Sandy Loam", "Red Soil", "Laterite Soil"],
        image_url: None,
    },
    CropSeed {
        name: "Pearl Millet",
        season: Season::Kharif,
        description: "Hardy millet for arid and semi-arid areas",
        expected_yield: "12-18 quintals/hectare",
        duration_days: 80,
        water_requirement: "Low",
        compatible_soils: &["Desert Soil", "Sandy Loam"],
        image_url: None,
    },
    CropSeed {
        name: "Tea",
        season: Season::Perennial,
        description: "Plantation crop of well-drained, acidic hill soils",
        expected_yield: "20-25 quintals/hectare of made tea",
        duration_days: 365,
        water_requirement: "High",
        compatible_soils: &["Laterite Soil", "Red Soil"],
        image_url: None,
    },
];

/// Total soil type rows the region table expands to
pub fn soil_type_count() -> usize {
    REGIONS.iter().map(|r| r.soil_types.len()).sum()
}
