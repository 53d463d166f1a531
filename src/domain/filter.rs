//! Filter keywords and text search over listings.
//!
//! A [`ListingFilter`] is parsed from the `filter` query parameter and turned
//! into a [`ListingPredicate`], which repositories either evaluate in memory
//! ([`ListingPredicate::matches`]) or translate into SQL.

use chrono::{Duration, NaiveDateTime};
use std::cmp::Reverse;

use crate::domain::listing::Listing;
use crate::domain::types::ListingCategory;

/// Filter keyword selected on the listings index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingFilter {
    #[default]
    All,
    /// Listings created within the last [`ListingFilter::NEW_WINDOW_DAYS`] days.
    New,
    Verified,
    PetFriendly,
    Category(ListingCategory),
    /// Any other keyword. Applies no predicate.
    Unrecognized(String),
}

impl ListingFilter {
    pub const NEW_WINDOW_DAYS: i64 = 7;

    /// Parses the raw query value. Absent, empty and `all` select everything.
    pub fn parse(value: Option<&str>) -> Self {
        let value = match value.map(str::trim) {
            None | Some("") | Some("all") => return Self::All,
            Some(value) => value,
        };
        match value {
            "new" => Self::New,
            "verified" => Self::Verified,
            "pet-friendly" => Self::PetFriendly,
            other => match ListingCategory::try_from(other) {
                Ok(category) => Self::Category(category),
                Err(_) => Self::Unrecognized(other.to_string()),
            },
        }
    }

    /// Keyword echoed back to templates as the active filter.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::New => "new",
            Self::Verified => "verified",
            Self::PetFriendly => "pet-friendly",
            Self::Category(category) => category.as_str(),
            Self::Unrecognized(value) => value,
        }
    }

    /// Storage predicate for this filter relative to `now`.
    pub fn predicate(&self, now: NaiveDateTime) -> Option<ListingPredicate> {
        match self {
            Self::All | Self::Unrecognized(_) => None,
            Self::New => Some(ListingPredicate::CreatedSince(
                now - Duration::days(Self::NEW_WINDOW_DAYS),
            )),
            Self::Verified => Some(ListingPredicate::Verified),
            Self::PetFriendly => Some(ListingPredicate::PetFriendly),
            Self::Category(category) => Some(ListingPredicate::Category(*category)),
        }
    }
}

/// Condition a listing must satisfy to be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPredicate {
    /// `created_at >= since`.
    CreatedSince(NaiveDateTime),
    /// `amenities.verified == true`.
    Verified,
    /// `amenities.pet_friendly == true`.
    PetFriendly,
    Category(ListingCategory),
}

impl ListingPredicate {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Self::CreatedSince(since) => listing.created_at >= *since,
            Self::Verified => listing.amenities.verified,
            Self::PetFriendly => listing.amenities.pet_friendly,
            Self::Category(category) => listing.category == *category,
        }
    }
}

/// Case-insensitive substring search over title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns `None` for an absent or blank query, which means "no search".
    pub fn parse(value: Option<&str>) -> Option<Self> {
        let trimmed = value?.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let needle = self.0.to_lowercase();
        listing.title.to_lowercase().contains(&needle)
            || listing.description.to_lowercase().contains(&needle)
    }
}

/// Sorts listings by creation time, newest first. Ties fall back to the
/// higher id so that ordering is stable across backends.
pub fn sort_newest_first(listings: &mut [Listing]) {
    listings.sort_by_key(|listing| Reverse((listing.created_at, listing.id)));
}
