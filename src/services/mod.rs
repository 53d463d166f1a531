pub mod errors;

pub use errors::{ServiceError, ServiceResult};

pub mod api;
pub mod listings;
pub mod reviews;
