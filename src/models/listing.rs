use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::geo::GeoPoint;
use crate::domain::listing::{Listing as DomainListing, NewListing as DomainNewListing};
use crate::domain::types::{
    Amenities, ImageFilename, ImageUrl, ListingCategory, ListingCountry, ListingDescription,
    ListingImage, ListingLocation, ListingPrice, ListingTitle, TypeConstraintError,
};

/// Diesel model representing a row in the `listings` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::listings)]
pub struct Listing {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub image_filename: String,
    pub price: f64,
    pub location: String,
    pub country: String,
    pub category: String,
    pub wifi: bool,
    pub parking: bool,
    pub ac: bool,
    pub kitchen: bool,
    pub pet_friendly: bool,
    pub breakfast: bool,
    pub verified: bool,
    pub is_new: bool,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Listing`] used for creating new rows.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::listings)]
pub struct NewListing<'a> {
    pub owner_id: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub image_filename: &'a str,
    pub price: f64,
    pub location: &'a str,
    pub country: &'a str,
    pub category: &'a str,
    pub wifi: bool,
    pub parking: bool,
    pub ac: bool,
    pub kitchen: bool,
    pub pet_friendly: bool,
    pub breakfast: bool,
    pub verified: bool,
    pub is_new: bool,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Rebuilds the canonical point from the two nullable location columns.
pub fn geometry_from_columns(
    longitude: Option<f64>,
    latitude: Option<f64>,
) -> Result<Option<GeoPoint>, TypeConstraintError> {
    match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => Ok(Some(GeoPoint::new(longitude, latitude)?)),
        (None, None) => Ok(None),
        _ => Err(TypeConstraintError::InvalidValue(
            "listing location has only one coordinate".to_string(),
        )),
    }
}

impl TryFrom<Listing> for DomainListing {
    type Error = TypeConstraintError;

    fn try_from(listing: Listing) -> Result<Self, Self::Error> {
        Ok(Self {
            id: listing.id.try_into()?,
            owner_id: listing.owner_id.try_into()?,
            title: ListingTitle::new(listing.title)?,
            description: ListingDescription::new(listing.description)?,
            image: ListingImage {
                url: ImageUrl::new(listing.image_url)?,
                filename: ImageFilename::new(listing.image_filename)?,
            },
            price: ListingPrice::new(listing.price)?,
            location: ListingLocation::new(listing.location)?,
            country: ListingCountry::new(listing.country)?,
            category: ListingCategory::try_from(listing.category)?,
            amenities: Amenities {
                wifi: listing.wifi,
                parking: listing.parking,
                ac: listing.ac,
                kitchen: listing.kitchen,
                pet_friendly: listing.pet_friendly,
                breakfast: listing.breakfast,
                verified: listing.verified,
                new: listing.is_new,
            },
            geometry: geometry_from_columns(listing.longitude, listing.latitude)?,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewListing> for NewListing<'a> {
    fn from(listing: &'a DomainNewListing) -> Self {
        Self {
            owner_id: listing.owner_id.get(),
            title: listing.title.as_str(),
            description: listing.description.as_str(),
            image_url: listing.image.url.as_str(),
            image_filename: listing.image.filename.as_str(),
            price: listing.price.get(),
            location: listing.location.as_str(),
            country: listing.country.as_str(),
            category: listing.category.as_str(),
            wifi: listing.amenities.wifi,
            parking: listing.amenities.parking,
            ac: listing.amenities.ac,
            kitchen: listing.amenities.kitchen,
            pet_friendly: listing.amenities.pet_friendly,
            breakfast: listing.amenities.breakfast,
            verified: listing.amenities.verified,
            is_new: listing.amenities.new,
            longitude: listing.geometry.map(|point| point.longitude()),
            latitude: listing.geometry.map(|point| point.latitude()),
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}
