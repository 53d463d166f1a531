use actix_web::ResponseError;
use actix_web::http::StatusCode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::geo::{
    CoordinateInput, GeoJsonPoint, GeoPoint, GeometryError, Latitude, Longitude,
    normalize_coordinates,
};
use crate::domain::listing::{Listing, ListingUpdate, NewListing};
use crate::domain::types::{
    Amenities, ImageUrl, ListingCategory, ListingCountry, ListingDescription, ListingImage,
    ListingLocation, ListingPrice, ListingTitle, UserId,
};

/// Raw create/edit listing submission.
///
/// Every field is kept as text so that a rejected submission can be echoed
/// back into the form unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub country: String,
    pub image: String,
    pub category: String,
    pub wifi: Option<String>,
    pub parking: Option<String>,
    pub ac: Option<String>,
    pub kitchen: Option<String>,
    pub pet_friendly: Option<String>,
    pub breakfast: Option<String>,
    pub verified: Option<String>,
    pub new: Option<String>,
    /// GeoJSON point as JSON text, filled in by the map picker.
    pub geometry: String,
    pub latitude: String,
    pub longitude: String,
}

/// Validated listing fields ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFormPayload {
    pub title: ListingTitle,
    pub description: ListingDescription,
    /// `None` when the image field was left blank.
    pub image: Option<ListingImage>,
    pub price: ListingPrice,
    pub location: ListingLocation,
    pub country: ListingCountry,
    pub category: ListingCategory,
    pub amenities: Amenities,
    pub geometry: Option<GeoPoint>,
}

impl ListingFormPayload {
    /// A blank image falls back to the placeholder.
    pub fn into_new_listing(self, owner_id: UserId, now: NaiveDateTime) -> NewListing {
        NewListing {
            owner_id,
            title: self.title,
            description: self.description,
            image: self.image.unwrap_or_else(ListingImage::placeholder),
            price: self.price,
            location: self.location,
            country: self.country,
            category: self.category,
            amenities: self.amenities,
            geometry: self.geometry,
            created_at: now,
            updated_at: now,
        }
    }

    /// A blank image keeps the listing's current one.
    pub fn into_update(self, now: NaiveDateTime) -> ListingUpdate {
        ListingUpdate {
            title: self.title,
            description: self.description,
            image: self.image,
            price: self.price,
            location: self.location,
            country: self.country,
            category: self.category,
            amenities: self.amenities,
            geometry: self.geometry,
            updated_at: now,
        }
    }
}

/// First rule a listing submission broke.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ListingFormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Valid price is required")]
    InvalidPrice,
    #[error("Unknown category \"{0}\"")]
    UnknownCategory(String),
    #[error("Image must be a valid URL")]
    InvalidImage,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ResponseError for ListingFormError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

fn required<T, E>(
    value: &str,
    label: &'static str,
    build: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ListingFormError> {
    build(value).map_err(|_| ListingFormError::Missing(label))
}

fn blank_to_none(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn checkbox(value: Option<&str>, default: bool) -> bool {
    match value.map(str::trim) {
        None => default,
        Some(value) => matches!(value, "on" | "true" | "1" | "yes"),
    }
}

fn parse_price(value: &str) -> Result<ListingPrice, ListingFormError> {
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| ListingFormError::InvalidPrice)?;
    ListingPrice::new(value).map_err(|_| ListingFormError::InvalidPrice)
}

fn parse_category(value: &str) -> Result<ListingCategory, ListingFormError> {
    match blank_to_none(value) {
        None => Ok(ListingCategory::default()),
        Some(value) => ListingCategory::try_from(value)
            .map_err(|_| ListingFormError::UnknownCategory(value.to_string())),
    }
}

fn parse_image(value: &str) -> Result<Option<ListingImage>, ListingFormError> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(value) => ImageUrl::new(value)
            .map(|url| Some(ListingImage::linked(url)))
            .map_err(|_| ListingFormError::InvalidImage),
    }
}

fn parse_geometry(value: &str) -> Result<Option<GeoJsonPoint>, GeometryError> {
    let Some(value) = blank_to_none(value) else {
        return Ok(None);
    };
    let point: GeoJsonPoint =
        serde_json::from_str(value).map_err(|e| GeometryError::Malformed(e.to_string()))?;
    GeoPoint::try_from(point.clone())?;
    Ok(Some(point))
}

fn parse_scalar(value: &str, label: &'static str) -> Result<Option<f64>, GeometryError> {
    blank_to_none(value)
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|_| GeometryError::NotANumber(label))
        })
        .transpose()
}

impl TryFrom<ListingForm> for ListingFormPayload {
    type Error = ListingFormError;

    fn try_from(value: ListingForm) -> Result<Self, Self::Error> {
        let title = required(&value.title, "Title", |v| ListingTitle::new(v))?;
        let description = required(&value.description, "Description", |v| {
            ListingDescription::new(v)
        })?;
        let location = required(&value.location, "Location", |v| ListingLocation::new(v))?;
        let country = required(&value.country, "Country", |v| ListingCountry::new(v))?;
        let price = parse_price(&value.price)?;
        let category = parse_category(&value.category)?;
        let image = parse_image(&value.image)?;

        let geometry = parse_geometry(&value.geometry)?;
        let latitude = parse_scalar(&value.latitude, "Latitude")?;
        let longitude = parse_scalar(&value.longitude, "Longitude")?;
        if let Some(latitude) = latitude {
            Latitude::new(latitude)?;
        }
        if let Some(longitude) = longitude {
            Longitude::new(longitude)?;
        }
        let geometry = normalize_coordinates(CoordinateInput {
            geometry,
            latitude,
            longitude,
        })?;

        let defaults = Amenities::default();
        let amenities = Amenities {
            wifi: checkbox(value.wifi.as_deref(), defaults.wifi),
            parking: checkbox(value.parking.as_deref(), defaults.parking),
            ac: checkbox(value.ac.as_deref(), defaults.ac),
            kitchen: checkbox(value.kitchen.as_deref(), defaults.kitchen),
            pet_friendly: checkbox(value.pet_friendly.as_deref(), defaults.pet_friendly),
            breakfast: checkbox(value.breakfast.as_deref(), defaults.breakfast),
            verified: checkbox(value.verified.as_deref(), defaults.verified),
            new: checkbox(value.new.as_deref(), defaults.new),
        };

        Ok(Self {
            title,
            description,
            image,
            price,
            location,
            country,
            category,
            amenities,
            geometry,
        })
    }
}

fn flag(value: bool) -> Option<String> {
    let value = if value { "on" } else { "off" };
    Some(value.to_string())
}

/// Pre-fills the edit form. The image field stays blank so that saving
/// without touching it keeps the current image.
impl From<&Listing> for ListingForm {
    fn from(listing: &Listing) -> Self {
        let amenities = &listing.amenities;
        Self {
            title: listing.title.to_string(),
            description: listing.description.to_string(),
            price: listing.price.to_string(),
            location: listing.location.to_string(),
            country: listing.country.to_string(),
            image: String::new(),
            category: listing.category.to_string(),
            wifi: flag(amenities.wifi),
            parking: flag(amenities.parking),
            ac: flag(amenities.ac),
            kitchen: flag(amenities.kitchen),
            pet_friendly: flag(amenities.pet_friendly),
            breakfast: flag(amenities.breakfast),
            verified: flag(amenities.verified),
            new: flag(amenities.new),
            geometry: listing
                .geometry
                .and_then(|point| serde_json::to_string(&point).ok())
                .unwrap_or_default(),
            latitude: listing
                .geometry
                .map(|point| point.latitude().to_string())
                .unwrap_or_default(),
            longitude: listing
                .geometry
                .map(|point| point.longitude().to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ListingForm {
        ListingForm {
            title: "A".into(),
            description: "B".into(),
            location: "C".into(),
            country: "D".into(),
            price: "100".into(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_non_positive_or_non_numeric_price() {
        for price in ["0", "-5", "abc", "", "inf"] {
            let form = ListingForm {
                price: price.into(),
                ..valid_form()
            };
            assert_eq!(
                ListingFormPayload::try_from(form).unwrap_err(),
                ListingFormError::InvalidPrice,
                "price {price:?}"
            );
        }
        let form = ListingForm {
            price: "0.01".into(),
            ..valid_form()
        };
        assert_eq!(ListingFormPayload::try_from(form).unwrap().price, 0.01);
    }

    #[test]
    fn rejects_blank_title() {
        let form = ListingForm {
            title: "   ".into(),
            ..valid_form()
        };
        let err = ListingFormPayload::try_from(form).unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let form = ListingForm {
            title: "Cabin".into(),
            ..valid_form()
        };
        assert_eq!(ListingFormPayload::try_from(form).unwrap().title, "Cabin");
    }

    #[test]
    fn reports_first_missing_text_field() {
        let empty = ListingForm::default();
        assert_eq!(
            ListingFormPayload::try_from(empty).unwrap_err(),
            ListingFormError::Missing("Title")
        );

        let cases = [
            (
                "Description",
                ListingForm {
                    description: String::new(),
                    ..valid_form()
                },
            ),
            (
                "Location",
                ListingForm {
                    location: " ".into(),
                    ..valid_form()
                },
            ),
            (
                "Country",
                ListingForm {
                    country: "\t".into(),
                    ..valid_form()
                },
            ),
        ];
        for (label, form) in cases {
            assert_eq!(
                ListingFormPayload::try_from(form).unwrap_err(),
                ListingFormError::Missing(label)
            );
        }

        let payload = ListingFormPayload::try_from(ListingForm {
            title: " Cabin ".into(),
            description: " Woods ".into(),
            location: " Aspen ".into(),
            country: " United States ".into(),
            ..valid_form()
        })
        .unwrap();
        assert_eq!(payload.description, "Woods");
        assert_eq!(payload.location, "Aspen");
        assert_eq!(payload.country, "United States");
    }

    #[test]
    fn reports_first_failing_field() {
        let form = ListingForm {
            description: "".into(),
            country: "".into(),
            price: "0".into(),
            ..valid_form()
        };
        assert_eq!(
            ListingFormPayload::try_from(form).unwrap_err().to_string(),
            "Description is required"
        );
    }

    #[test]
    fn scalar_coordinates_normalize_to_geojson() {
        let form = ListingForm {
            latitude: "40.0".into(),
            longitude: "-74.0".into(),
            ..valid_form()
        };
        let payload = ListingFormPayload::try_from(form).unwrap();
        let point = payload.geometry.unwrap();
        assert_eq!(
            GeoJsonPoint::from(point),
            GeoJsonPoint {
                kind: "Point".into(),
                coordinates: vec![-74.0, 40.0],
            }
        );
        assert_eq!(point.latitude(), 40.0);
        assert_eq!(point.longitude(), -74.0);
    }

    #[test]
    fn geometry_text_wins_over_scalars() {
        let form = ListingForm {
            geometry: r#"{"type":"Point","coordinates":[2.35,48.85]}"#.into(),
            latitude: "1".into(),
            longitude: "1".into(),
            ..valid_form()
        };
        let point = ListingFormPayload::try_from(form).unwrap().geometry.unwrap();
        assert_eq!(point.coordinates(), [2.35, 48.85]);
    }

    #[test]
    fn rejects_malformed_geometry() {
        let cases = [
            r#"{"type":"Point","coordinates":[1.0]}"#,
            r#"{"type":"Polygon","coordinates":[1.0,2.0]}"#,
            r#"{"type":"Point","coordinates":[200.0,2.0]}"#,
            r#"{"type":"Point","coordinates":["a","b"]}"#,
            "not json",
        ];
        for geometry in cases {
            let form = ListingForm {
                geometry: geometry.into(),
                ..valid_form()
            };
            assert!(
                matches!(
                    ListingFormPayload::try_from(form),
                    Err(ListingFormError::Geometry(_))
                ),
                "geometry {geometry:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_or_non_numeric_scalars() {
        let form = ListingForm {
            latitude: "91".into(),
            longitude: "0".into(),
            ..valid_form()
        };
        assert_eq!(
            ListingFormPayload::try_from(form).unwrap_err().to_string(),
            "Latitude must be between -90 and 90"
        );

        let form = ListingForm {
            longitude: "east".into(),
            ..valid_form()
        };
        assert_eq!(
            ListingFormPayload::try_from(form).unwrap_err().to_string(),
            "Longitude must be a number"
        );
    }

    #[test]
    fn zero_is_a_real_coordinate() {
        let form = ListingForm {
            latitude: "0".into(),
            longitude: "0".into(),
            ..valid_form()
        };
        let point = ListingFormPayload::try_from(form).unwrap().geometry.unwrap();
        assert_eq!(point.coordinates(), [0.0, 0.0]);
    }

    #[test]
    fn defaults_category_image_and_amenities() {
        let payload = ListingFormPayload::try_from(valid_form()).unwrap();
        assert_eq!(payload.category, ListingCategory::Standard);
        assert_eq!(payload.image, None);
        assert_eq!(payload.amenities, Amenities::default());
        assert_eq!(payload.geometry, None);

        let form = ListingForm {
            category: "castle".into(),
            ..valid_form()
        };
        assert_eq!(
            ListingFormPayload::try_from(form).unwrap_err(),
            ListingFormError::UnknownCategory("castle".into())
        );

        let form = ListingForm {
            image: "nope".into(),
            ..valid_form()
        };
        assert_eq!(
            ListingFormPayload::try_from(form).unwrap_err(),
            ListingFormError::InvalidImage
        );
    }

    #[test]
    fn maps_amenity_checkboxes() {
        let form = ListingForm {
            wifi: Some("on".into()),
            pet_friendly: Some("on".into()),
            new: Some("off".into()),
            ..valid_form()
        };
        let amenities = ListingFormPayload::try_from(form).unwrap().amenities;
        assert!(amenities.wifi && amenities.pet_friendly);
        assert!(!amenities.new && !amenities.verified);
    }

    #[test]
    fn edit_form_round_trips_listing_fields() {
        let now = chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        let form = ListingForm {
            category: "beach".into(),
            verified: Some("on".into()),
            latitude: "10".into(),
            longitude: "20".into(),
            ..valid_form()
        };
        let new_listing = ListingFormPayload::try_from(form)
            .unwrap()
            .into_new_listing(UserId::new(1).unwrap(), now);
        let listing = Listing {
            id: crate::domain::types::ListingId::new(1).unwrap(),
            owner_id: new_listing.owner_id,
            title: new_listing.title,
            description: new_listing.description,
            image: new_listing.image,
            price: new_listing.price,
            location: new_listing.location,
            country: new_listing.country,
            category: new_listing.category,
            amenities: new_listing.amenities,
            geometry: new_listing.geometry,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(listing.image, ListingImage::placeholder());

        let update = ListingFormPayload::try_from(ListingForm::from(&listing))
            .unwrap()
            .into_update(now);
        assert_eq!(update.image, None);
        assert_eq!(update.category, listing.category);
        assert_eq!(update.amenities, listing.amenities);
        assert_eq!(update.geometry, listing.geometry);
    }
}
