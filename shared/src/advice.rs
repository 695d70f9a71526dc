//! Per-crop cultivation advice

use crate::models::CropAdvice;

struct AdviceEntry {
    crop: &'static str,
    irrigation: &'static str,
    fertilizer: &'static str,
    pest_control: &'static str,
}

const ADVICE: &[AdviceEntry] = &[
    AdviceEntry {
        crop: "Rice",
        irrigation: "Maintain 2-5 cm of standing water until grain filling, then drain 10 days before harvest",
        fertilizer: "Apply 120 kg N, 60 kg P2O5 and 40 kg K2O per hectare; split nitrogen into three doses",
        pest_control: "Watch for stem borer and brown planthopper; use light traps and avoid excess nitrogen",
    },
    AdviceEntry {
        crop: "Wheat",
        irrigation: "Irrigate at crown root initiation, tillering, jointing, flowering and grain filling",
        fertilizer: "Apply 120 kg N, 60 kg P2O5 and 40 kg K2O per hectare; half the nitrogen at sowing",
        pest_control: "Scout for aphids and yellow rust; use resistant varieties and timely fungicide sprays",
    },
    AdviceEntry {
        crop: "Cotton",
        irrigation: "Irrigate every 10-15 days; avoid water stress during flowering and boll formation",
        fertilizer: "Apply 100 kg N, 50 kg P2O5 and 50 kg K2O per hectare with farmyard manure",
        pest_control: "Monitor pink bollworm with pheromone traps; remove and destroy infested bolls",
    },
    AdviceEntry {
        crop: "Sugarcane",
        irrigation: "Irrigate every 7-10 days in summer and every 15-20 days in winter; mulch with trash",
        fertilizer: "Apply 250 kg N, 115 kg P2O5 and 115 kg K2O per hectare in three splits",
        pest_control: "Control early shoot borer with trash mulching and release of Trichogramma",
    },
    AdviceEntry {
        crop: "Maize",
        irrigation: "Keep soil moist at knee-high, tasselling and silking stages; avoid waterlogging",
        fertilizer: "Apply 120 kg N, 60 kg P2O5 and 40 kg K2O per hectare plus zinc sulphate",
        pest_control: "Check whorls for fall armyworm; apply neem-based sprays early in infestation",
    },
    AdviceEntry {
        crop: "Mustard",
        irrigation: "Give one irrigation at flowering and one at pod filling",
        fertilizer: "Apply 80 kg N, 40 kg P2O5 and 40 kg sulphur per hectare",
        pest_control: "Watch for aphids in January; spray when colonies exceed 25 per plant",
    },
    AdviceEntry {
        crop: "Chickpea",
        irrigation: "Grow on residual moisture; one light irrigation at pod formation if needed",
        fertilizer: "Apply 20 kg N and 40 kg P2O5 per hectare; treat seed with Rhizobium",
        pest_control: "Install bird perches and pheromone traps against pod borer",
    },
];

const GENERIC: AdviceEntry = AdviceEntry {
    crop: "",
    irrigation: "Irrigate according to crop stage and soil moisture; avoid both drought stress and waterlogging",
    fertilizer: "Apply balanced NPK based on a soil test, supplemented with organic manure",
    pest_control: "Scout the field weekly and follow integrated pest management practices",
};

impl AdviceEntry {
    fn to_advice(&self) -> CropAdvice {
        CropAdvice {
            irrigation: self.irrigation.to_string(),
            fertilizer: self.fertilizer.to_string(),
            pest_control: self.pest_control.to_string(),
        }
    }
}

/// Advice for a crop by name, or the generic bundle for unknown crops
pub fn advice_for(crop_name: &str) -> CropAdvice {
    ADVICE
        .iter()
        .find(|a| a.crop == crop_name)
        .unwrap_or(&GENERIC)
        .to_advice()
}

/// The bundle returned for crops without specific advice
pub fn generic_advice() -> CropAdvice {
    GENERIC.to_advice()
}
