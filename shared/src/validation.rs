//! Validation utilities for CropAdviser

use crate::models::{Region, SoilType};
use crate::scoring::{MAX_SCORE, MIN_SCORE};
use crate::types::LocationSelection;

// ============================================================================
// Location Selection
// ============================================================================

/// Parse a selector value (sent as a string by the region/soil dropdowns)
pub fn parse_selection_id(value: &str) -> Result<i32, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Selection cannot be empty");
    }
    match trimmed.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err("Selection must be a positive id"),
        Err(_) => Err("Selection must be a numeric id"),
    }
}

/// Parse both selector values into a typed selection
pub fn parse_location(
    selected_state: &str,
    selected_soil_type: &str,
) -> Result<LocationSelection, (&'static str, &'static str)> {
    let region_id = parse_selection_id(selected_state).map_err(|e| ("selectedState", e))?;
    let soil_type_id =
        parse_selection_id(selected_soil_type).map_err(|e| ("selectedSoilType", e))?;
    Ok(LocationSelection {
        region_id,
        soil_type_id,
    })
}

/// A soil type may only be selected together with the region it belongs to
pub fn validate_soil_in_region(region: &Region, soil_type: &SoilType) -> Result<(), &'static str> {
    if !soil_type.belongs_to(region.id) {
        return Err("Soil type does not belong to the selected state");
    }
    Ok(())
}

// ============================================================================
// Scores
// ============================================================================

pub fn validate_compatibility_score(score: i32) -> Result<(), &'static str> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err("Compatibility score out of range");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_selection_id() {
        assert_eq!(parse_selection_id("7"), Ok(7));
        assert_eq!(parse_selection_id(" 12 "), Ok(12));
        assert!(parse_selection_id("").is_err());
        assert!(parse_selection_id("   ").is_err());
        assert!(parse_selection_id("abc").is_err());
        assert!(parse_selection_id("0").is_err());
        assert!(parse_selection_id("-3").is_err());
    }

    #[test]
    fn test_parse_location_reports_failing_field() {
        assert_eq!(parse_location("", "1").unwrap_err().0, "selectedState");
        assert_eq!(parse_location("1", "x").unwrap_err().0, "selectedSoilType");

        let selection = parse_location("1", "2").unwrap();
        assert_eq!(selection.region_id, 1);
        assert_eq!(selection.soil_type_id, 2);
    }

    #[test]
    fn test_soil_must_belong_to_region() {
        let region = Region {
            id: 1,
            name: "Punjab".to_string(),
            code: "PB".to_string(),
            created_at: Utc::now(),
        };
        let mut soil = SoilType {
            id: 4,
            region_id: 1,
            name: "Alluvial Soil".to_string(),
            description: String::new(),
            ph_range: "6.5-8.0".to_string(),
            characteristics: String::new(),
            created_at: Utc::now(),
        };
        assert!(validate_soil_in_region(&region, &soil).is_ok());

        soil.region_id = 2;
        assert!(validate_soil_in_region(&region, &soil).is_err());
    }

    #[test]
    fn test_validate_compatibility_score() {
        assert!(validate_compatibility_score(50).is_ok());
        assert!(validate_compatibility_score(99).is_ok());
        assert!(validate_compatibility_score(49).is_err());
        assert!(validate_compatibility_score(100).is_err());
    }
}
