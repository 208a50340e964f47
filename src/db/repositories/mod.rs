//! Storage backends implementing the repository traits.
//!
//! `local` keeps everything in process memory and is the default for tests
//! and development. `postgres` (behind the `postgres-repo` feature) persists
//! through Diesel over a pooled connection.
pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::{PostgresConfig, PostgresRepository};
