//! Place domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Geographic coordinates resolved from a postal address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Place domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Free-text postal address as entered by the user
    pub address: String,
    pub location: Coordinates,
    /// Relative path of the place image under the upload directory
    pub image_path: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// Create a new place owned by `creator_id`
    pub fn new(
        title: String,
        description: String,
        address: String,
        location: Coordinates,
        image_path: String,
        creator_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            address,
            location,
            image_path,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the user-editable fields
    pub fn edit(&mut self, title: String, description: String) {
        self.title = title;
        self.description = description;
        self.updated_at = Utc::now();
    }
}

/// Place wire representation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlaceResponse {
    /// Unique place identifier
    #[schema(example = "7f2c1a9e-3b64-4a1d-9c0f-1d2e3f405060")]
    pub id: Uuid,
    #[schema(example = "Empire State Building")]
    pub title: String,
    pub description: String,
    #[schema(example = "20 W 34th St, New York, NY 10001")]
    pub address: String,
    pub location: Coordinates,
    /// Image path served under /uploads/images
    pub image: String,
    /// Id of the owning user
    pub creator: Uuid,
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            title: place.title,
            description: place.description,
            address: place.address,
            location: place.location,
            image: place.image_path,
            creator: place.creator_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_maps_internal_fields_to_wire_names() {
        let creator = Uuid::new_v4();
        let place = Place::new(
            "Cafe".to_string(),
            "Nice spot downtown".to_string(),
            "1600 Amphitheatre Pkwy, Mountain View, CA".to_string(),
            Coordinates {
                lat: 37.4224,
                lng: -122.0841,
            },
            "uploads/images/cafe.png".to_string(),
            creator,
        );
        let id = place.id;

        let value = serde_json::to_value(PlaceResponse::from(place)).unwrap();
        assert_eq!(value["id"], serde_json::json!(id));
        assert_eq!(value["creator"], serde_json::json!(creator));
        assert_eq!(value["image"], "uploads/images/cafe.png");
        assert_eq!(value["location"]["lat"], 37.4224);
        assert_eq!(value["location"]["lng"], -122.0841);
        // Internal field names never leak
        assert!(value.get("image_path").is_none());
        assert!(value.get("creator_id").is_none());
    }

    #[test]
    fn edit_replaces_title_and_description() {
        let mut place = Place::new(
            "Old title".to_string(),
            "Old description".to_string(),
            "Somewhere 1".to_string(),
            Coordinates { lat: 0.0, lng: 0.0 },
            "uploads/images/x.png".to_string(),
            Uuid::new_v4(),
        );

        place.edit("New title".to_string(), "New description".to_string());
        assert_eq!(place.title, "New title");
        assert_eq!(place.description, "New description");
    }
}
