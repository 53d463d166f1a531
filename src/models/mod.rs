//! Diesel row models and their conversions to domain types.

#[cfg(feature = "server")]
pub mod config;
pub mod listing;
pub mod review;
pub mod user;
