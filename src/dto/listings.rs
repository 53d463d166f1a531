use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::geo::GeoJsonPoint;
use crate::domain::listing::Listing;
use crate::domain::review::Review;
use crate::domain::types::{Amenities, ListingCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDto {
    pub url: String,
    pub filename: String,
}

/// Client-facing listing. `latitude`/`longitude` mirror `geometry` and are
/// present exactly when it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image: ImageDto,
    pub price: f64,
    pub location: String,
    pub country: String,
    pub category: ListingCategory,
    pub amenities: Amenities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeoJsonPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub owner: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Listing> for ListingDto {
    fn from(value: Listing) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            description: value.description.into_inner(),
            image: ImageDto {
                url: value.image.url.into_inner(),
                filename: value.image.filename.into_inner(),
            },
            price: value.price.get(),
            location: value.location.into_inner(),
            country: value.country.into_inner(),
            category: value.category,
            amenities: value.amenities,
            geometry: value.geometry.map(GeoJsonPoint::from),
            latitude: value.geometry.map(|point| point.latitude()),
            longitude: value.geometry.map(|point| point.longitude()),
            owner: value.owner_id.get(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub author_id: i32,
    pub author: String,
    pub comment: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        Self {
            id: value.id.get(),
            author_id: value.author_id.get(),
            author: value.author.into_inner(),
            comment: value.comment.into_inner(),
            rating: value.rating.get(),
            created_at: value.created_at,
        }
    }
}
