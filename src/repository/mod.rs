use crate::db::{DbConnection, DbPool};
use crate::domain::filter::{ListingPredicate, SearchQuery};
use crate::domain::listing::{Listing, ListingUpdate, NewListing};
use crate::domain::review::{NewReview, Review};
use crate::domain::types::{ListingId, ReviewId, UserEmail, UserId};
use crate::domain::user::{NewUser, User};

pub mod errors;
pub mod listing;
pub mod review;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing or searching listings.
#[derive(Debug, Clone, Default)]
pub struct ListingListQuery {
    /// Filter predicate derived from the `filter` keyword.
    pub predicate: Option<ListingPredicate>,
    /// Text search over title and description.
    pub search: Option<SearchQuery>,
}

impl ListingListQuery {
    pub fn predicate(mut self, predicate: ListingPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }
    pub fn search(mut self, search: SearchQuery) -> Self {
        self.search = Some(search);
        self
    }
}

/// Read-only operations for listing entities.
pub trait ListingReader {
    /// Listings matching the query, newest first.
    fn list_listings(&self, query: ListingListQuery) -> RepositoryResult<Vec<Listing>>;
    /// Listings whose title or description contains the search text, in
    /// storage order.
    fn search_listings(&self, query: ListingListQuery) -> RepositoryResult<Vec<Listing>>;
    /// Retrieve a listing by its identifier.
    fn get_listing_by_id(&self, id: ListingId) -> RepositoryResult<Option<Listing>>;
}

/// Write operations for listing entities.
pub trait ListingWriter {
    /// Persist a new listing and return it with its assigned id.
    fn create_listing(&self, listing: &NewListing) -> RepositoryResult<Listing>;
    /// Overwrite the owner-editable fields of a listing.
    fn update_listing(&self, id: ListingId, update: &ListingUpdate) -> RepositoryResult<usize>;
    /// Delete a listing together with all of its reviews.
    fn delete_listing(&self, id: ListingId) -> RepositoryResult<usize>;
}

/// Read-only operations for review entities.
pub trait ReviewReader {
    /// Reviews of a listing in the order they were posted.
    fn list_reviews(&self, listing_id: ListingId) -> RepositoryResult<Vec<Review>>;
    /// Retrieve a review by its identifier.
    fn get_review_by_id(&self, id: ReviewId) -> RepositoryResult<Option<Review>>;
}

/// Write operations for review entities.
pub trait ReviewWriter {
    /// Persist a new review and return it with its author resolved.
    fn create_review(&self, review: &NewReview) -> RepositoryResult<Review>;
    /// Delete a review by id.
    fn delete_review(&self, id: ReviewId) -> RepositoryResult<usize>;
}

/// Read-only operations for user entities.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
}

/// Write operations for user entities.
pub trait UserWriter {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}
