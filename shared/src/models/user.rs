//! User models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account, keyed by the identity provider's subject
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(rename = "selectedStateId")]
    pub selected_region_id: Option<i32>,
    pub selected_soil_type_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The stored (region, soil type) selection, when both are set
    pub fn location(&self) -> Option<(i32, i32)> {
        self.selected_region_id.zip(self.selected_soil_type_id)
    }
}

/// Profile fields supplied by the identity provider on login
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "42".to_string(),
            email: Some("farmer@example.com".to_string()),
            first_name: None,
            last_name: None,
            profile_image_url: None,
            selected_region_id: None,
            selected_soil_type_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn location_requires_both_selections() {
        let mut u = user();
        assert_eq!(u.location(), None);

        u.selected_region_id = Some(1);
        assert_eq!(u.location(), None);

        u.selected_soil_type_id = Some(3);
        assert_eq!(u.location(), Some((1, 3)));
    }
}
