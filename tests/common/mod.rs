//! Helpers for integration tests.

use chrono::{NaiveDateTime, Utc};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rentroot::db::{DbPool, establish_connection_pool};
use rentroot::domain::listing::NewListing;
use rentroot::domain::types::{
    Amenities, ListingCategory, ListingCountry, ListingDescription, ListingImage, ListingLocation,
    ListingPrice, ListingTitle, UserEmail, UserId, Username,
};
use rentroot::domain::user::{NewUser, User};
use rentroot::repository::{DieselRepository, UserWriter};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

#[allow(dead_code)]
pub fn create_user(repo: &DieselRepository, name: &str) -> User {
    repo.create_user(&NewUser {
        username: Username::new(name).expect("valid username"),
        email: UserEmail::new(format!("{name}@example.com")).expect("valid email"),
        created_at: Utc::now().naive_utc(),
    })
    .expect("should create user")
}

#[allow(dead_code)]
pub fn new_listing(owner_id: UserId, title: &str, created_at: NaiveDateTime) -> NewListing {
    NewListing {
        owner_id,
        title: ListingTitle::new(title).expect("valid title"),
        description: ListingDescription::new("A lovely place").expect("valid description"),
        image: ListingImage::placeholder(),
        price: ListingPrice::new(150.0).expect("valid price"),
        location: ListingLocation::new("Goa").expect("valid location"),
        country: ListingCountry::new("India").expect("valid country"),
        category: ListingCategory::Standard,
        amenities: Amenities::default(),
        geometry: None,
        created_at,
        updated_at: created_at,
    }
}
