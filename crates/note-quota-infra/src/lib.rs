//! # Note Quota Infrastructure
//!
//! Concrete implementations of the ports defined in `note-quota-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL edit store via SeaORM

pub mod database;

pub use database::{DatabaseConfig, InMemoryNoteEditRepository};

#[cfg(feature = "postgres")]
pub use database::PostgresNoteEditRepository;
