//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request asking whether an author may update a note.
///
/// `target` and `public_identifier` may be omitted when `read_only` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanUpdateNoteRequest {
    #[serde(default)]
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_identifier: Option<String>,
    #[serde(default)]
    pub read_only: bool,
}

/// Edits the author has left in the current window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanUpdateNoteResponse {
    pub remaining_edits: i32,
}

impl CanUpdateNoteResponse {
    pub fn new(remaining_edits: u32) -> Self {
        Self {
            remaining_edits: i32::try_from(remaining_edits).unwrap_or(i32::MAX),
        }
    }
}
