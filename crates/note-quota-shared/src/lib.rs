//! # Note Quota Shared
//!
//! Wire types shared between the note quota server and its clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
