//! Compatibility scoring
//!
//! A crop is either compatible with the selected soil or not. The score is a
//! uniform draw from the band for that outcome.

use rand::Rng;
use std::ops::RangeInclusive;

use crate::advice::advice_for;
use crate::models::{Crop, NewRecommendation, SoilType};

pub const COMPATIBLE_SCORES: RangeInclusive<i32> = 80..=99;
pub const INCOMPATIBLE_SCORES: RangeInclusive<i32> = 50..=79;

pub const MIN_SCORE: i32 = 50;
pub const MAX_SCORE: i32 = 99;

/// Score band for a compatibility outcome
pub fn score_range(compatible: bool) -> RangeInclusive<i32> {
    if compatible {
        COMPATIBLE_SCORES
    } else {
        INCOMPATIBLE_SCORES
    }
}

pub fn draw_score<R: Rng + ?Sized>(compatible: bool, rng: &mut R) -> i32 {
    rng.gen_range(score_range(compatible))
}

/// Score every crop against the soil type, one recommendation per crop
pub fn score_crops<R: Rng + ?Sized>(
    crops: &[Crop],
    soil_type: &SoilType,
    rng: &mut R,
) -> Vec<NewRecommendation> {
    crops
        .iter()
        .map(|crop| {
            let compatible = crop.is_compatible_with(&soil_type.name);
            NewRecommendation {
                crop_id: crop.id,
                region_id: soil_type.region_id,
                soil_type_id: soil_type.id,
                compatibility_score: draw_score(compatible, rng),
                advice: advice_for(&crop.name),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    proptest! {
        #[test]
        fn draws_stay_in_band(seed in any::<u64>(), compatible in any::<bool>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let score = draw_score(compatible, &mut rng);
            prop_assert!(score_range(compatible).contains(&score));
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
        }
    }

    #[test]
    fn bands_do_not_overlap() {
        assert_eq!(*INCOMPATIBLE_SCORES.end() + 1, *COMPATIBLE_SCORES.start());
        assert_eq!(*INCOMPATIBLE_SCORES.start(), MIN_SCORE);
        assert_eq!(*COMPATIBLE_SCORES.end(), MAX_SCORE);
    }
}
