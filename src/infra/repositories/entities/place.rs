//! Place database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Coordinates, Place};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub image_path: String,
    pub creator_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Place {
    fn from(model: Model) -> Self {
        Place {
            id: model.id,
            title: model.title,
            description: model.description,
            address: model.address,
            location: Coordinates {
                lat: model.lat,
                lng: model.lng,
            },
            image_path: model.image_path,
            creator_id: model.creator_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert domain entity to an insertable active model
impl From<Place> for ActiveModel {
    fn from(place: Place) -> Self {
        ActiveModel {
            id: Set(place.id),
            title: Set(place.title),
            description: Set(place.description),
            address: Set(place.address),
            lat: Set(place.location.lat),
            lng: Set(place.location.lng),
            image_path: Set(place.image_path),
            creator_id: Set(place.creator_id),
            created_at: Set(place.created_at),
            updated_at: Set(place.updated_at),
        }
    }
}
