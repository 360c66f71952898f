use super::{NoteKey, NoteTarget};
use crate::error::DomainError;

pub const MAX_AUTHOR_ID_LEN: usize = 255;
pub const MAX_PUBLIC_IDENTIFIER_LEN: usize = 255;

/// Raw "can this author update this note" request, as received by the boundary.
///
/// Empty strings for `target` and `public_identifier` are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct NoteEditRequest {
    pub author_id: String,
    pub target: Option<String>,
    pub public_identifier: Option<String>,
    pub read_only: bool,
}

/// What a validated request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAccess {
    /// Report remaining edits, never consume or deny.
    ReadOnly,
    /// Consume an edit on this note, unless coalesced with a recent one.
    Edit(NoteKey),
}

impl NoteEditRequest {
    /// Check the structural preconditions of a decision.
    pub fn validate(&self) -> Result<NoteAccess, DomainError> {
        if self.author_id.is_empty() {
            return Err(DomainError::invalid("author_id is required"));
        }
        if self.author_id.chars().count() > MAX_AUTHOR_ID_LEN {
            return Err(DomainError::invalid(format!(
                "author_id must be at most {MAX_AUTHOR_ID_LEN} characters"
            )));
        }

        // Optional fields are still checked when present in read-only mode.
        let target = non_empty(&self.target)
            .map(str::parse::<NoteTarget>)
            .transpose()?;

        let public_identifier = non_empty(&self.public_identifier);
        if let Some(public_identifier) = public_identifier {
            if public_identifier.chars().count() > MAX_PUBLIC_IDENTIFIER_LEN {
                return Err(DomainError::invalid(format!(
                    "public_identifier must be at most {MAX_PUBLIC_IDENTIFIER_LEN} characters"
                )));
            }
        }

        if self.read_only {
            return Ok(NoteAccess::ReadOnly);
        }

        match (target, public_identifier) {
            (Some(target), Some(public_identifier)) => {
                Ok(NoteAccess::Edit(NoteKey::new(target, public_identifier)))
            }
            (None, _) => Err(DomainError::invalid(
                "target is required unless read_only is set",
            )),
            (_, None) => Err(DomainError::invalid(
                "public_identifier is required unless read_only is set",
            )),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
