//! RFC 7807 compliant error responses.

use serde::{Deserialize, Serialize};

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    /// The author has no edits left and no editing session applies.
    pub fn note_edits_exhausted() -> Self {
        Self::new(429, "Note edits exhausted")
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }

    /// The deadline passed before the decision completed; the edit may or
    /// may not have been recorded.
    pub fn not_confirmed() -> Self {
        Self::new(504, "Gateway Timeout").with_detail("Outcome not confirmed, retry the request")
    }
}
