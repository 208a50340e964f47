//! # Depot Scheduling Backend
//!
//! Administrative REST backend for scheduling vehicle-service facility
//! appointments. Schedule templates define recurring service windows;
//! schedule instances are their concrete, dated occurrences. Weekdays and
//! vehicle facilities are reference data. Search-enabled entities mirror
//! their writes into a full-text index, and a CSV-backed translator renders
//! display text for the operations screens.
//!
//! ## Architecture
//!
//! - [`models`]: domain entities and id newtypes
//! - [`db`]: repository traits, error types, and storage backends
//! - [`search`]: full-text search-index mirrors
//! - [`services`]: template-to-instance expansion
//! - [`i18n`]: the startup-loaded display-language dictionary
//! - [`http`]: axum-based HTTP server, handlers, and router

pub mod db;
pub mod i18n;
pub mod models;
pub mod search;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
