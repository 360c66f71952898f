//! # Note Quota Core
//!
//! The domain layer of the note edit quota service.
//! This crate holds the quota decision rule, the edit store port and the
//! domain types, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::CanUpdateNoteService;
