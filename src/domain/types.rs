//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be positive was zero/negative or invalid.
    #[error("{0} must be greater than zero")]
    NonPositiveNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// Review ratings are whole stars from one to five.
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a user.", "user_id");
id_newtype!(ListingId, "Unique identifier for a listing.", "listing_id");
id_newtype!(ReviewId, "Unique identifier for a review.", "review_id");

non_empty_string_newtype!(
    ListingTitle,
    "Listing title enforcing non-empty values.",
    "title"
);
non_empty_string_newtype!(
    ListingDescription,
    "Listing description enforcing non-empty values.",
    "description"
);
non_empty_string_newtype!(
    ListingLocation,
    "Listing location (city, area) enforcing non-empty values.",
    "location"
);
non_empty_string_newtype!(
    ListingCountry,
    "Listing country enforcing non-empty values.",
    "country"
);
non_empty_string_newtype!(
    ImageFilename,
    "Storage filename of a listing image.",
    "image filename"
);
non_empty_string_newtype!(
    ReviewComment,
    "Review comment enforcing non-empty values.",
    "comment"
);
non_empty_string_newtype!(Username, "Public user name.", "username");

/// Image URL shown for a listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Constructs a trimmed URL and validates its format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "image url")?;
        if !trimmed.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl("image url"));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image shown on a listing card: a public URL plus its storage filename.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingImage {
    pub url: ImageUrl,
    pub filename: ImageFilename,
}

impl ListingImage {
    pub const DEFAULT_URL: &'static str = "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8MTV8fGNhbXBpbmd8ZW58MHx8MHx8fDA%3D&auto=format&fit=crop&w=800&q=60";
    pub const DEFAULT_FILENAME: &'static str = "default_listing_image";
    /// Filename recorded for images given by URL rather than uploaded.
    pub const LINKED_FILENAME: &'static str = "listingimage";

    /// Image used when a listing is created without one.
    pub fn placeholder() -> Self {
        Self {
            url: ImageUrl(Self::DEFAULT_URL.to_string()),
            filename: ImageFilename(Self::DEFAULT_FILENAME.to_string()),
        }
    }

    /// Image referenced by an external URL.
    pub fn linked(url: ImageUrl) -> Self {
        Self {
            url,
            filename: ImageFilename(Self::LINKED_FILENAME.to_string()),
        }
    }
}

/// Contact email of a user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    /// Constructs a trimmed, lower-cased email address and validates its format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?.to_lowercase();
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nightly price of a listing. Strictly positive and finite.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct ListingPrice(f64);

impl ListingPrice {
    /// Constructs a strictly positive, finite price.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveNumber("price"))
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ListingPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for ListingPrice {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<f64> for ListingPrice {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Star rating attached to a review, from 1 to 5 inclusive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ReviewRating(i32);

impl ReviewRating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// Constructs a rating within `MIN..=MAX`.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidRating)
        }
    }

    /// Returns the raw `i32` value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for ReviewRating {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<i32> for ReviewRating {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Fixed set of listing categories used for browsing.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingCategory {
    Trending,
    Luxury,
    Budget,
    Beach,
    Mountain,
    City,
    Pool,
    #[default]
    Standard,
}

impl ListingCategory {
    /// Every category in display order.
    pub const ALL: [ListingCategory; 8] = [
        Self::Trending,
        Self::Luxury,
        Self::Budget,
        Self::Beach,
        Self::Mountain,
        Self::City,
        Self::Pool,
        Self::Standard,
    ];

    /// String representation used in persistence and query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Luxury => "luxury",
            Self::Budget => "budget",
            Self::Beach => "beach",
            Self::Mountain => "mountain",
            Self::City => "city",
            Self::Pool => "pool",
            Self::Standard => "standard",
        }
    }
}

impl Display for ListingCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ListingCategory {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("category: {value}")))
    }
}

impl TryFrom<String> for ListingCategory {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<ListingCategory> for String {
    fn from(value: ListingCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Boolean amenity flags used for quick filters.
///
/// Every flag defaults to `false` except `new`, which marks fresh listings
/// until the owner clears it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default, rename_all = "camelCase")]
pub struct Amenities {
    pub wifi: bool,
    pub parking: bool,
    pub ac: bool,
    pub kitchen: bool,
    pub pet_friendly: bool,
    pub breakfast: bool,
    pub verified: bool,
    pub new: bool,
}

impl Default for Amenities {
    fn default() -> Self {
        Self {
            wifi: false,
            parking: false,
            ac: false,
            kitchen: false,
            pet_friendly: false,
            breakfast: false,
            verified: false,
            new: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = ListingTitle::new("  Cabin  ").unwrap();
        assert_eq!(value.as_str(), "Cabin");
    }

    #[test]
    fn rejects_whitespace_only_strings() {
        let err = ListingTitle::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("title"));
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ListingId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("listing_id"));
    }

    #[test]
    fn validates_image_urls() {
        assert!(ImageUrl::new("https://example.com/cabin.jpg").is_ok());
        let err = ImageUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("image url"));
    }

    #[test]
    fn placeholder_image_is_a_valid_url() {
        let image = ListingImage::placeholder();
        assert!(ImageUrl::new(image.url.as_str()).is_ok());
        assert_eq!(image.filename.as_str(), "default_listing_image");
    }

    #[test]
    fn normalizes_emails() {
        let email = UserEmail::new(" Student@Example.com ").unwrap();
        assert_eq!(email.as_str(), "student@example.com");
        assert!(UserEmail::new("student").is_err());
    }

    #[test]
    fn listing_price_must_be_positive() {
        assert_eq!(ListingPrice::new(0.01).unwrap().get(), 0.01);
        assert_eq!(
            ListingPrice::new(0.0).unwrap_err(),
            TypeConstraintError::NonPositiveNumber("price")
        );
        assert!(ListingPrice::new(-5.0).is_err());
        assert!(ListingPrice::new(f64::NAN).is_err());
    }

    #[test]
    fn review_rating_is_bounded() {
        assert!(ReviewRating::new(1).is_ok());
        assert!(ReviewRating::new(5).is_ok());
        assert_eq!(
            ReviewRating::new(6).unwrap_err(),
            TypeConstraintError::InvalidRating
        );
        assert!(ReviewRating::new(0).is_err());
    }

    #[test]
    fn parses_categories() {
        assert_eq!(
            ListingCategory::try_from("beach").unwrap(),
            ListingCategory::Beach
        );
        assert!(ListingCategory::try_from("castle").is_err());
        assert_eq!(ListingCategory::default(), ListingCategory::Standard);
    }

    #[test]
    fn amenities_default_to_new_only() {
        let amenities = Amenities::default();
        assert!(amenities.new);
        assert!(!amenities.wifi && !amenities.verified && !amenities.pet_friendly);
    }

    #[test]
    fn amenities_serialize_with_camel_case_names() {
        let json = serde_json::to_value(Amenities::default()).unwrap();
        assert_eq!(json["petFriendly"], false);
        assert_eq!(json["new"], true);
    }
}
