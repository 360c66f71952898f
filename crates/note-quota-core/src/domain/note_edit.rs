use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NoteTarget;

/// Identifies a logical note for recency coalescing, together with an author.
///
/// Not a uniqueness constraint: many edits share the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteKey {
    pub target: NoteTarget,
    pub public_identifier: String,
}

impl NoteKey {
    pub fn new(target: NoteTarget, public_identifier: impl Into<String>) -> Self {
        Self {
            target,
            public_identifier: public_identifier.into(),
        }
    }
}

/// NoteEdit entity - one accepted edit event. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEdit {
    pub id: Uuid,
    pub author_id: String,
    pub target: NoteTarget,
    pub public_identifier: String,
    /// Assigned by the store at insertion time.
    pub created_at: DateTime<Utc>,
}

impl NoteEdit {
    /// Whether this edit was made on the given note.
    pub fn is_for(&self, author_id: &str, note: &NoteKey) -> bool {
        self.author_id == author_id
            && self.target == note.target
            && self.public_identifier == note.public_identifier
    }
}
