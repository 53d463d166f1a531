use diesel::prelude::*;

use crate::domain::filter::{ListingPredicate, SearchQuery};
use crate::domain::listing::{Listing, ListingUpdate, NewListing};
use crate::domain::types::ListingId;
use crate::models::listing::{Listing as DbListing, NewListing as DbNewListing};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ListingListQuery, ListingReader, ListingWriter};
use crate::schema::listings;

type BoxedListings<'a> = listings::BoxedQuery<'a, diesel::sqlite::Sqlite>;

fn apply_predicate(items: BoxedListings<'_>, predicate: ListingPredicate) -> BoxedListings<'_> {
    match predicate {
        ListingPredicate::CreatedSince(since) => items.filter(listings::created_at.ge(since)),
        ListingPredicate::Verified => items.filter(listings::verified.eq(true)),
        ListingPredicate::PetFriendly => items.filter(listings::pet_friendly.eq(true)),
        ListingPredicate::Category(category) => {
            items.filter(listings::category.eq(category.as_str()))
        }
    }
}

// Matched in Rust: SQLite's `LIKE` only folds ASCII case.
fn retain_matching(listings: &mut Vec<Listing>, search: Option<&SearchQuery>) {
    if let Some(search) = search {
        listings.retain(|listing| search.matches(listing));
    }
}

fn into_domain(rows: Vec<DbListing>) -> RepositoryResult<Vec<Listing>> {
    Ok(rows
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Listing>, _>>()?)
}

impl ListingReader for DieselRepository {
    fn list_listings(&self, query: ListingListQuery) -> RepositoryResult<Vec<Listing>> {
        let mut conn = self.conn()?;

        let mut items = listings::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(predicate) = query.predicate {
            items = apply_predicate(items, predicate);
        }

        let rows = items
            .order((listings::created_at.desc(), listings::id.desc()))
            .load::<DbListing>(&mut conn)?;

        let mut listings = into_domain(rows)?;
        retain_matching(&mut listings, query.search.as_ref());
        Ok(listings)
    }

    fn search_listings(&self, query: ListingListQuery) -> RepositoryResult<Vec<Listing>> {
        let mut conn = self.conn()?;

        let mut items = listings::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(predicate) = query.predicate {
            items = apply_predicate(items, predicate);
        }

        let rows = items.load::<DbListing>(&mut conn)?;

        let mut listings = into_domain(rows)?;
        retain_matching(&mut listings, query.search.as_ref());
        Ok(listings)
    }

    fn get_listing_by_id(&self, id: ListingId) -> RepositoryResult<Option<Listing>> {
        let mut conn = self.conn()?;

        let listing = listings::table
            .filter(listings::id.eq(id.get()))
            .first::<DbListing>(&mut conn)
            .optional()?;

        let listing = listing.map(TryInto::try_into).transpose()?;
        Ok(listing)
    }
}

impl ListingWriter for DieselRepository {
    fn create_listing(&self, listing: &NewListing) -> RepositoryResult<Listing> {
        let mut conn = self.conn()?;
        let db_listing: DbNewListing = listing.into();

        let created = diesel::insert_into(listings::table)
            .values(&db_listing)
            .get_result::<DbListing>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_listing(&self, id: ListingId, update: &ListingUpdate) -> RepositoryResult<usize> {
        use crate::schema::listings::dsl;

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let affected = diesel::update(dsl::listings.filter(dsl::id.eq(id.get())))
                .set((
                    dsl::title.eq(update.title.as_str()),
                    dsl::description.eq(update.description.as_str()),
                    dsl::price.eq(update.price.get()),
                    dsl::location.eq(update.location.as_str()),
                    dsl::country.eq(update.country.as_str()),
                    dsl::category.eq(update.category.as_str()),
                    dsl::wifi.eq(update.amenities.wifi),
                    dsl::parking.eq(update.amenities.parking),
                    dsl::ac.eq(update.amenities.ac),
                    dsl::kitchen.eq(update.amenities.kitchen),
                    dsl::pet_friendly.eq(update.amenities.pet_friendly),
                    dsl::breakfast.eq(update.amenities.breakfast),
                    dsl::verified.eq(update.amenities.verified),
                    dsl::is_new.eq(update.amenities.new),
                    dsl::longitude.eq(update.geometry.map(|point| point.longitude())),
                    dsl::latitude.eq(update.geometry.map(|point| point.latitude())),
                    dsl::updated_at.eq(update.updated_at),
                ))
                .execute(conn)?;

            if let Some(image) = &update.image {
                diesel::update(dsl::listings.filter(dsl::id.eq(id.get())))
                    .set((
                        dsl::image_url.eq(image.url.as_str()),
                        dsl::image_filename.eq(image.filename.as_str()),
                    ))
                    .execute(conn)?;
            }

            Ok(affected)
        })?;

        Ok(affected)
    }

    fn delete_listing(&self, id: ListingId) -> RepositoryResult<usize> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(reviews::table.filter(reviews::listing_id.eq(id.get()))).execute(conn)?;

            diesel::delete(listings::table.filter(listings::id.eq(id.get()))).execute(conn)
        })?;

        Ok(affected)
    }
}
