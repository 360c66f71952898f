//! The note edit quota decision.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{NoteAccess, NoteEditRequest, NoteTierLimits};
use crate::error::DomainError;
use crate::ports::NoteEditRepository;

/// Window in which further edits of the same note do not count as a new edit.
pub const NOTE_EDIT_BUFFER_MINUTES: i64 = 60;

pub fn note_edit_buffer() -> Duration {
    Duration::minutes(NOTE_EDIT_BUFFER_MINUTES)
}

/// Decides whether an author may edit a note, and records the edit if so.
///
/// The count and the insert are separate store calls, so concurrent requests
/// from one author can overshoot `max_edits` by the number in flight. The
/// quota is soft; callers must not rely on it as a hard limit.
#[derive(Clone)]
pub struct CanUpdateNoteService {
    edits: Arc<dyn NoteEditRepository>,
}

impl CanUpdateNoteService {
    pub fn new(edits: Arc<dyn NoteEditRepository>) -> Self {
        Self { edits }
    }

    /// Returns the number of edits the author has left after this call.
    ///
    /// Read-only requests only report. Edits of a note last touched within
    /// the buffer are free and never denied. Otherwise the edit is recorded,
    /// or refused with [`DomainError::QuotaExhausted`] when nothing is left.
    ///
    /// Dropping the returned future abandons the in-flight store call; the
    /// caller must then treat the outcome as unconfirmed.
    pub async fn decide(
        &self,
        request: &NoteEditRequest,
        limits: &NoteTierLimits,
        now: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        let access = request.validate()?;
        let author_id = request.author_id.as_str();

        let since = limits.window_start(now);
        let edit_count = self.edits.count_since(author_id, since).await?;

        // Overshoot (lowered limit, concurrent inserts) reports zero.
        let remaining = limits.remaining_after(edit_count);

        let note = match access {
            NoteAccess::ReadOnly => return Ok(remaining),
            NoteAccess::Edit(note) => note,
        };

        let latest = self.edits.latest_for_note(author_id, &note).await?;

        // Still inside the editing session of this note, even with no quota left.
        let session_start = now
            .checked_sub_signed(note_edit_buffer())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        if latest.is_some_and(|edit| edit.created_at > session_start) {
            return Ok(remaining);
        }

        if remaining == 0 {
            return Err(DomainError::QuotaExhausted);
        }

        self.edits.insert(author_id, &note).await?;

        Ok(remaining - 1)
    }
}
