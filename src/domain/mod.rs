//! Persistence-agnostic domain model.

pub mod filter;
pub mod geo;
pub mod listing;
pub mod review;
pub mod types;
pub mod user;
