use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};
use crate::domain::types::{ReviewComment, ReviewRating, TypeConstraintError, Username};
use crate::models::user::User;

/// Diesel model representing a row in the `reviews` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub listing_id: i32,
    pub author_id: i32,
    pub comment: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Review`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub listing_id: i32,
    pub author_id: i32,
    pub comment: &'a str,
    pub rating: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<(Review, User)> for DomainReview {
    type Error = TypeConstraintError;

    fn try_from((review, author): (Review, User)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: review.id.try_into()?,
            listing_id: review.listing_id.try_into()?,
            author_id: review.author_id.try_into()?,
            author: Username::new(author.username)?,
            comment: ReviewComment::new(review.comment)?,
            rating: ReviewRating::new(review.rating)?,
            created_at: review.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(review: &'a DomainNewReview) -> Self {
        Self {
            listing_id: review.listing_id.get(),
            author_id: review.author_id.get(),
            comment: review.comment.as_str(),
            rating: review.rating.get(),
            created_at: review.created_at,
        }
    }
}
