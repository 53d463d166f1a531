use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::geo::GeoPoint;
use crate::domain::types::{
    Amenities, ListingCategory, ListingCountry, ListingDescription, ListingId, ListingImage,
    ListingLocation, ListingPrice, ListingTitle, UserId,
};

/// A rentable property record.
///
/// The location is held once, as a [`GeoPoint`]; scalar latitude/longitude
/// are derived from it when the listing is serialized for clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    /// Set at creation and never changed.
    pub owner_id: UserId,
    pub title: ListingTitle,
    pub description: ListingDescription,
    pub image: ListingImage,
    pub price: ListingPrice,
    pub location: ListingLocation,
    pub country: ListingCountry,
    pub category: ListingCategory,
    pub amenities: Amenities,
    pub geometry: Option<GeoPoint>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Listing`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListing {
    pub owner_id: UserId,
    pub title: ListingTitle,
    pub description: ListingDescription,
    pub image: ListingImage,
    pub price: ListingPrice,
    pub location: ListingLocation,
    pub country: ListingCountry,
    pub category: ListingCategory,
    pub amenities: Amenities,
    pub geometry: Option<GeoPoint>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Owner-editable fields of a [`Listing`].
///
/// `owner_id` and `created_at` are absent on purpose: they are immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingUpdate {
    pub title: ListingTitle,
    pub description: ListingDescription,
    /// `None` keeps the current image.
    pub image: Option<ListingImage>,
    pub price: ListingPrice,
    pub location: ListingLocation,
    pub country: ListingCountry,
    pub category: ListingCategory,
    pub amenities: Amenities,
    /// `None` clears the location.
    pub geometry: Option<GeoPoint>,
    pub updated_at: NaiveDateTime,
}

impl Listing {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}
