use actix_web::ResponseError;
use actix_web::http::StatusCode;
use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::review::NewReview;
use crate::domain::types::{ListingId, ReviewComment, ReviewRating, TypeConstraintError, UserId};

/// Raw review submission. Missing fields deserialize as blank so that
/// they are reported through [`ReviewFormError`] instead of the extractor.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ReviewForm {
    #[validate(length(min = 1))]
    pub comment: String,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFormPayload {
    pub comment: ReviewComment,
    pub rating: ReviewRating,
}

impl ReviewFormPayload {
    pub fn into_new_review(
        self,
        listing_id: ListingId,
        author_id: UserId,
        now: NaiveDateTime,
    ) -> NewReview {
        NewReview {
            listing_id,
            author_id,
            comment: self.comment,
            rating: self.rating,
            created_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReviewFormError {
    #[error("Review form validation failed: {0}")]
    Validation(String),
    #[error("Review form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Rating must be a whole number")]
    InvalidRating,
}

impl ResponseError for ReviewFormError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl From<ValidationErrors> for ReviewFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ReviewFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ReviewForm> for ReviewFormPayload {
    type Error = ReviewFormError;

    fn try_from(value: ReviewForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let rating = value
            .rating
            .trim()
            .parse::<i32>()
            .map_err(|_| ReviewFormError::InvalidRating)?;

        Ok(Self {
            comment: ReviewComment::new(value.comment)?,
            rating: ReviewRating::new(rating)?,
        })
    }
}
