use chrono::Utc;
use serde::Deserialize;

use crate::domain::filter::{ListingFilter, SearchQuery};
use crate::dto::listings::ListingDto;
use crate::repository::{ListingListQuery, ListingReader};

use super::{ServiceError, ServiceResult};

/// Query parameters accepted by the `api_v1_listings` endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct ApiV1ListingsQueryParams {
    pub filter: Option<String>,
    pub q: Option<String>,
}

/// Core business logic for the `/api/v1/listings` endpoint.
///
/// A non-blank `q` switches to text search; the filter keyword narrows either
/// result set. Unknown keywords are ignored.
pub fn api_v1_listings<R>(
    params: ApiV1ListingsQueryParams,
    repo: &R,
) -> ServiceResult<Vec<ListingDto>>
where
    R: ListingReader,
{
    let filter = ListingFilter::parse(params.filter.as_deref());
    let mut list_query = ListingListQuery::default();
    if let Some(predicate) = filter.predicate(Utc::now().naive_utc()) {
        list_query = list_query.predicate(predicate);
    }

    let result = match SearchQuery::parse(params.q.as_deref()) {
        Some(search) => repo.search_listings(list_query.search(search)),
        None => repo.list_listings(list_query),
    };

    match result {
        Ok(listings) => Ok(listings.into_iter().map(ListingDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list listings: {e}");
            Err(ServiceError::Internal)
        }
    }
}
