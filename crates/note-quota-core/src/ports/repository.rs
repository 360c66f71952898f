use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NoteEdit, NoteKey};
use crate::error::RepoError;

/// Append-only store of accepted note edits.
///
/// Each operation is atomic on its own; callers get no isolation across
/// operations.
#[async_trait]
pub trait NoteEditRepository: Send + Sync {
    /// Count the author's edits on any note created at or after `since`.
    async fn count_since(&self, author_id: &str, since: DateTime<Utc>) -> Result<u64, RepoError>;

    /// Find the most recent edit of one note by the author.
    /// Ties on `created_at` are broken arbitrarily.
    async fn latest_for_note(
        &self,
        author_id: &str,
        note: &NoteKey,
    ) -> Result<Option<NoteEdit>, RepoError>;

    /// Record a new edit. The store assigns `id` and `created_at`.
    async fn insert(&self, author_id: &str, note: &NoteKey) -> Result<NoteEdit, RepoError>;
}
