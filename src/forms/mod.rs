pub mod listings;
pub mod reviews;
