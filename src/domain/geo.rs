//! Geographic coordinates attached to listings.
//!
//! A listing location is stored as a single [`GeoPoint`]. Its GeoJSON form
//! (`{"type": "Point", "coordinates": [lng, lat]}`) and the scalar
//! latitude/longitude pair are both projections of that point, so they can
//! never drift apart.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Reasons a submitted location cannot be turned into a [`GeoPoint`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The geometry payload is not a GeoJSON object with numeric coordinates.
    #[error("Invalid geometry: {0}")]
    Malformed(String),
    /// Only `Point` geometries are accepted.
    #[error("Geometry type must be \"Point\", got \"{0}\"")]
    UnsupportedType(String),
    /// A point has exactly two coordinates.
    #[error("Invalid coordinates provided")]
    CoordinateCount(usize),
    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    /// A scalar coordinate could not be parsed.
    #[error("{0} must be a number")]
    NotANumber(&'static str),
}

impl From<GeometryError> for TypeConstraintError {
    fn from(value: GeometryError) -> Self {
        TypeConstraintError::InvalidValue(value.to_string())
    }
}

macro_rules! bounded_coordinate_newtype {
    ($name:ident, $doc:expr, $min:expr, $max:expr, $err:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            pub const MIN: f64 = $min;
            pub const MAX: f64 = $max;

            /// Constructs a finite value within `MIN..=MAX`.
            pub fn new(value: f64) -> Result<Self, GeometryError> {
                if (Self::MIN..=Self::MAX).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err($err)
                }
            }

            /// Returns the raw `f64` value in decimal degrees.
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = GeometryError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_coordinate_newtype!(
    Latitude,
    "Latitude in decimal degrees.",
    -90.0,
    90.0,
    GeometryError::LatitudeOutOfRange
);
bounded_coordinate_newtype!(
    Longitude,
    "Longitude in decimal degrees.",
    -180.0,
    180.0,
    GeometryError::LongitudeOutOfRange
);

/// GeoJSON wire representation of a point, as submitted or serialized.
///
/// Accepts any `type` and coordinate count; [`GeoPoint::try_from`] enforces
/// the point shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

/// Canonical location of a listing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "GeoJsonPoint", into = "GeoJsonPoint")]
pub struct GeoPoint {
    longitude: Longitude,
    latitude: Latitude,
}

impl GeoPoint {
    pub const GEOJSON_TYPE: &'static str = "Point";

    /// Builds a point from raw degrees, validating both ranges.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            longitude: Longitude::new(longitude)?,
            latitude: Latitude::new(latitude)?,
        })
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude.get()
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude.get()
    }

    /// Coordinates in GeoJSON order: `[longitude, latitude]`.
    pub const fn coordinates(&self) -> [f64; 2] {
        [self.longitude.get(), self.latitude.get()]
    }
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = GeometryError;

    fn try_from(value: GeoJsonPoint) -> Result<Self, Self::Error> {
        if value.kind != Self::GEOJSON_TYPE {
            return Err(GeometryError::UnsupportedType(value.kind));
        }
        match value.coordinates.as_slice() {
            [longitude, latitude] => Self::new(*longitude, *latitude),
            other => Err(GeometryError::CoordinateCount(other.len())),
        }
    }
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(value: GeoPoint) -> Self {
        Self {
            kind: GeoPoint::GEOJSON_TYPE.to_string(),
            coordinates: value.coordinates().to_vec(),
        }
    }
}

/// Location fields as they arrive on a create or update submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateInput {
    pub geometry: Option<GeoJsonPoint>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Reconciles the accepted location shapes into one canonical point.
///
/// GeoJSON wins over scalars. Scalars are only used when both are present.
/// With neither, the listing has no location. Malformed geometry is rejected
/// rather than stored.
pub fn normalize_coordinates(input: CoordinateInput) -> Result<Option<GeoPoint>, GeometryError> {
    match input {
        CoordinateInput {
            geometry: Some(geometry),
            ..
        } => GeoPoint::try_from(geometry).map(Some),
        CoordinateInput {
            geometry: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        } => GeoPoint::new(longitude, latitude).map(Some),
        _ => Ok(None),
    }
}
