use chrono::Utc;
use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::filter::{ListingFilter, SearchQuery};
use crate::domain::listing::Listing;
use crate::domain::review::average_rating;
use crate::domain::types::{ListingId, Username};
use crate::dto::listings::{ListingDto, ReviewDto};
use crate::forms::listings::{ListingForm, ListingFormPayload};
use crate::repository::{ListingListQuery, ListingReader, ListingWriter, ReviewReader, UserReader};

use super::{ServiceError, ServiceResult};

/// Keyword exposed as `current_filter` on search result pages.
pub const SEARCH_FILTER: &str = "search";

/// Listings shown on the index or search page.
#[derive(Debug, Serialize)]
pub struct ListingsPage {
    pub listings: Vec<ListingDto>,
    pub current_filter: String,
    pub query: Option<String>,
}

/// Everything the listing page renders.
#[derive(Debug, Serialize)]
pub struct ListingDetails {
    pub listing: ListingDto,
    pub owner: Option<Username>,
    pub reviews: Vec<ReviewDto>,
    pub average_rating: f64,
    pub is_owner: bool,
}

fn parse_listing_id(listing_id: i32) -> ServiceResult<ListingId> {
    ListingId::new(listing_id).map_err(|_| ServiceError::NotFound)
}

pub(crate) fn load_listing<R>(listing_id: ListingId, repo: &R) -> ServiceResult<Listing>
where
    R: ListingReader,
{
    match repo.get_listing_by_id(listing_id) {
        Ok(Some(listing)) => Ok(listing),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get listing {listing_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn load_owned_listing<R>(
    listing_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Listing>
where
    R: ListingReader,
{
    let listing = load_listing(parse_listing_id(listing_id)?, repo)?;
    if !listing.is_owned_by(user.id) {
        return Err(ServiceError::Unauthorized);
    }
    Ok(listing)
}

/// Lists listings matching the `filter` keyword, newest first.
///
/// Unknown keywords are ignored and every listing is returned.
pub fn show_listings<R>(filter: Option<&str>, repo: &R) -> ServiceResult<ListingsPage>
where
    R: ListingReader,
{
    let filter = ListingFilter::parse(filter);
    if let ListingFilter::Unrecognized(keyword) = &filter {
        log::debug!("Ignoring unrecognized listing filter '{keyword}'");
    }

    let mut query = ListingListQuery::default();
    if let Some(predicate) = filter.predicate(Utc::now().naive_utc()) {
        query = query.predicate(predicate);
    }

    match repo.list_listings(query) {
        Ok(listings) => Ok(ListingsPage {
            listings: listings.into_iter().map(ListingDto::from).collect(),
            current_filter: filter.as_str().to_string(),
            query: None,
        }),
        Err(e) => {
            log::error!("Failed to list listings: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Searches titles and descriptions.
///
/// Returns `Ok(None)` for a blank query so that the caller can fall back to
/// the full index.
pub fn search_listings<R>(query: Option<&str>, repo: &R) -> ServiceResult<Option<ListingsPage>>
where
    R: ListingReader,
{
    let Some(search) = SearchQuery::parse(query) else {
        return Ok(None);
    };
    let text = search.as_str().to_string();

    match repo.search_listings(ListingListQuery::default().search(search)) {
        Ok(listings) => Ok(Some(ListingsPage {
            listings: listings.into_iter().map(ListingDto::from).collect(),
            current_filter: SEARCH_FILTER.to_string(),
            query: Some(text),
        })),
        Err(e) => {
            log::error!("Failed to search listings: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Loads a listing with its owner, reviews and average rating.
pub fn show_listing<R>(
    listing_id: i32,
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<ListingDetails>
where
    R: ListingReader + ReviewReader + UserReader,
{
    let listing = load_listing(parse_listing_id(listing_id)?, repo)?;

    let owner = match repo.get_user_by_id(listing.owner_id) {
        Ok(owner) => owner.map(|owner| owner.username),
        Err(e) => {
            log::error!("Failed to get owner of listing {}: {e}", listing.id);
            return Err(ServiceError::Internal);
        }
    };

    let reviews = match repo.list_reviews(listing.id) {
        Ok(reviews) => reviews,
        Err(e) => {
            log::error!("Failed to list reviews of listing {}: {e}", listing.id);
            return Err(ServiceError::Internal);
        }
    };

    Ok(ListingDetails {
        is_owner: user.is_some_and(|user| listing.is_owned_by(user.id)),
        average_rating: average_rating(&reviews),
        reviews: reviews.into_iter().map(ReviewDto::from).collect(),
        owner,
        listing: ListingDto::from(listing),
    })
}

/// Validates the submission and stores a listing owned by `user`.
pub fn create_listing<R>(
    form: ListingForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<ListingDto>
where
    R: ListingWriter,
{
    let payload = ListingFormPayload::try_from(form).map_err(|e| {
        log::debug!("Rejected listing submission: {e}");
        ServiceError::Form(e.to_string())
    })?;

    let new_listing = payload.into_new_listing(user.id, Utc::now().naive_utc());
    match repo.create_listing(&new_listing) {
        Ok(listing) => {
            log::info!("User {} created listing {}", user.id, listing.id);
            Ok(ListingDto::from(listing))
        }
        Err(e) => {
            log::error!("Failed to create listing: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Pre-filled edit form for a listing owned by `user`.
pub fn listing_for_edit<R>(
    listing_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(ListingDto, ListingForm)>
where
    R: ListingReader,
{
    let listing = load_owned_listing(listing_id, user, repo)?;
    let form = ListingForm::from(&listing);
    Ok((ListingDto::from(listing), form))
}

/// Overwrites the editable fields of a listing owned by `user`.
///
/// The owner and creation time are never touched.
pub fn update_listing<R>(
    listing_id: i32,
    form: ListingForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: ListingReader + ListingWriter,
{
    let listing = load_owned_listing(listing_id, user, repo)?;

    let payload = ListingFormPayload::try_from(form).map_err(|e| {
        log::debug!("Rejected listing update: {e}");
        ServiceError::Form(e.to_string())
    })?;

    match repo.update_listing(listing.id, &payload.into_update(Utc::now().naive_utc())) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update listing {}: {e}", listing.id);
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a listing owned by `user` together with its reviews.
pub fn delete_listing<R>(listing_id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: ListingReader + ListingWriter,
{
    let listing = load_owned_listing(listing_id, user, repo)?;

    match repo.delete_listing(listing.id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("User {} deleted listing {}", user.id, listing.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete listing {}: {e}", listing.id);
            Err(ServiceError::Internal)
        }
    }
}
