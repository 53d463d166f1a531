use diesel::prelude::*;

use crate::domain::review::{NewReview, Review};
use crate::domain::types::{ListingId, ReviewId};
use crate::models::review::{NewReview as DbNewReview, Review as DbReview};
use crate::models::user::User as DbUser;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ReviewReader, ReviewWriter};
use crate::schema::{reviews, users};

impl ReviewReader for DieselRepository {
    fn list_reviews(&self, listing_id: ListingId) -> RepositoryResult<Vec<Review>> {
        let mut conn = self.conn()?;

        let rows = reviews::table
            .inner_join(users::table)
            .filter(reviews::listing_id.eq(listing_id.get()))
            .order((reviews::created_at.asc(), reviews::id.asc()))
            .load::<(DbReview, DbUser)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Review>, _>>()?)
    }

    fn get_review_by_id(&self, id: ReviewId) -> RepositoryResult<Option<Review>> {
        let mut conn = self.conn()?;

        let review = reviews::table
            .inner_join(users::table)
            .filter(reviews::id.eq(id.get()))
            .first::<(DbReview, DbUser)>(&mut conn)
            .optional()?;

        let review = review.map(TryInto::try_into).transpose()?;
        Ok(review)
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, review: &NewReview) -> RepositoryResult<Review> {
        let mut conn = self.conn()?;
        let db_review: DbNewReview = review.into();

        let (created, author) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let created = diesel::insert_into(reviews::table)
                .values(&db_review)
                .get_result::<DbReview>(conn)?;
            let author = users::table
                .filter(users::id.eq(created.author_id))
                .first::<DbUser>(conn)?;
            Ok((created, author))
        })?;

        Ok((created, author).try_into()?)
    }

    fn delete_review(&self, id: ReviewId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(reviews::table.filter(reviews::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
