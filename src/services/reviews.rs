use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::domain::types::{ListingId, ReviewId};
use crate::dto::listings::ReviewDto;
use crate::forms::reviews::{ReviewForm, ReviewFormPayload};
use crate::repository::{ListingReader, ReviewReader, ReviewWriter};
use crate::services::listings::load_listing;

use super::{ServiceError, ServiceResult};

/// Adds a review by `user` to an existing listing.
pub fn create_review<R>(
    listing_id: i32,
    form: ReviewForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<ReviewDto>
where
    R: ListingReader + ReviewWriter,
{
    let listing_id = ListingId::new(listing_id).map_err(|_| ServiceError::NotFound)?;
    let listing = load_listing(listing_id, repo)?;

    let payload = ReviewFormPayload::try_from(form).map_err(|e| {
        log::debug!("Rejected review submission: {e}");
        ServiceError::Form("Review needs a comment and a rating from 1 to 5".to_string())
    })?;

    let new_review = payload.into_new_review(listing.id, user.id, Utc::now().naive_utc());
    match repo.create_review(&new_review) {
        Ok(review) => {
            log::info!("User {} reviewed listing {}", user.id, listing.id);
            Ok(ReviewDto::from(review))
        }
        Err(e) => {
            log::error!("Failed to create review: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a review written by `user`.
///
/// The review must belong to the listing named in the path.
pub fn delete_review<R>(
    listing_id: i32,
    review_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: ReviewReader + ReviewWriter,
{
    let listing_id = ListingId::new(listing_id).map_err(|_| ServiceError::NotFound)?;
    let review_id = ReviewId::new(review_id).map_err(|_| ServiceError::NotFound)?;

    let review = match repo.get_review_by_id(review_id) {
        Ok(Some(review)) if review.listing_id == listing_id => review,
        Ok(_) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get review {review_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !review.is_authored_by(user.id) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.delete_review(review.id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("User {} deleted review {}", user.id, review.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete review {}: {e}", review.id);
            Err(ServiceError::Internal)
        }
    }
}
