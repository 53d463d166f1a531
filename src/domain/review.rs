use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ListingId, ReviewComment, ReviewId, ReviewRating, UserId, Username};

/// A rating and comment left by a user on a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub listing_id: ListingId,
    pub author_id: UserId,
    /// Display name of the author, resolved when the review is loaded.
    pub author: Username,
    pub comment: ReviewComment,
    pub rating: ReviewRating,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Review`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub listing_id: ListingId,
    pub author_id: UserId,
    pub comment: ReviewComment,
    pub rating: ReviewRating,
    pub created_at: NaiveDateTime,
}

impl Review {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// Mean rating of `reviews`, or `0.0` when there are none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: i32 = reviews.iter().map(|review| review.rating.get()).sum();
    f64::from(total) / reviews.len() as f64
}
