//! Core library exports for the RentRoot service.
//!
//! The `data` feature exposes the domain model, Diesel models and
//! repositories. The `server` feature adds forms, services and the Actix-web
//! routes used by the web application.

pub mod db;
pub mod domain;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
