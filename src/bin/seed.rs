//! Loads the demo account and sample listings into an empty database.
//!
//! Usage: `seed [path/to/listings.json]` (defaults to `data/listings_seed.json`).

use chrono::Utc;
use serde::Deserialize;

use rentroot::db::establish_connection_pool;
use rentroot::domain::listing::NewListing;
use rentroot::domain::types::{
    Amenities, ImageFilename, ImageUrl, ListingCategory, ListingCountry, ListingDescription,
    ListingImage, ListingLocation, ListingPrice, ListingTitle, TypeConstraintError, UserEmail,
    UserId, Username,
};
use rentroot::domain::user::NewUser;
use rentroot::models::config::ServerConfig;
use rentroot::repository::{
    DieselRepository, ListingListQuery, ListingReader, ListingWriter, UserReader, UserWriter,
};

const DEFAULT_SEED_PATH: &str = "data/listings_seed.json";
const DEMO_USERNAME: &str = "student";
const DEMO_EMAIL: &str = "student@gmail.com";

#[derive(Deserialize)]
struct SeedImage {
    url: String,
    filename: String,
}

#[derive(Deserialize)]
struct SeedListing {
    title: String,
    description: String,
    image: SeedImage,
    price: f64,
    location: String,
    country: String,
    category: String,
    #[serde(default)]
    amenities: Amenities,
}

impl SeedListing {
    fn into_new_listing(self, owner_id: UserId) -> Result<NewListing, TypeConstraintError> {
        let now = Utc::now().naive_utc();
        Ok(NewListing {
            owner_id,
            title: ListingTitle::new(self.title)?,
            description: ListingDescription::new(self.description)?,
            image: ListingImage {
                url: ImageUrl::new(self.image.url)?,
                filename: ImageFilename::new(self.image.filename)?,
            },
            price: ListingPrice::new(self.price)?,
            location: ListingLocation::new(self.location)?,
            country: ListingCountry::new(self.country)?,
            category: ListingCategory::try_from(self.category)?,
            amenities: self.amenities,
            geometry: None,
            created_at: now,
            updated_at: now,
        })
    }
}

fn demo_user(repo: &DieselRepository) -> Result<UserId, Box<dyn std::error::Error>> {
    let email = UserEmail::new(DEMO_EMAIL)?;
    if let Some(user) = repo.get_user_by_email(&email)? {
        return Ok(user.id);
    }
    let user = repo.create_user(&NewUser {
        username: Username::new(DEMO_USERNAME)?,
        email,
        created_at: Utc::now().naive_utc(),
    })?;
    log::info!("Created demo user '{}'", user.username);
    Ok(user.id)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let server_config = ServerConfig::load()?;
    let repo = DieselRepository::new(establish_connection_pool(&server_config.database_url)?);

    let owner_id = demo_user(&repo)?;

    if !repo.list_listings(ListingListQuery::default())?.is_empty() {
        log::warn!("Listings already exist, skipping insert");
        return Ok(());
    }

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SEED_PATH.to_string());
    let seed: Vec<SeedListing> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    let total = seed.len();
    for listing in seed {
        repo.create_listing(&listing.into_new_listing(owner_id)?)?;
    }
    log::info!("Inserted {total} sample listings from {path}");
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("Seeding failed: {e}");
        std::process::exit(1);
    }
}
