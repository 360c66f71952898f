//! PostgreSQL edit store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use uuid::Uuid;

use note_quota_core::RepoError;
use note_quota_core::domain::{NoteEdit, NoteKey};
use note_quota_core::ports::NoteEditRepository;

use super::entity::note_edit::{self, Entity as NoteEditEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL note edit repository.
pub type PostgresNoteEditRepository = PostgresBaseRepository<NoteEditEntity>;

/// The author's edits on any note since `since`, inclusive.
pub(crate) fn edits_since(author_id: &str, since: DateTime<Utc>) -> Select<NoteEditEntity> {
    NoteEditEntity::find()
        .filter(note_edit::Column::AuthorId.eq(author_id))
        .filter(note_edit::Column::CreatedAt.gte(since))
}

/// The author's edits of one note, newest first.
pub(crate) fn edits_of_note(author_id: &str, note: &NoteKey) -> Select<NoteEditEntity> {
    NoteEditEntity::find()
        .filter(note_edit::Column::AuthorId.eq(author_id))
        .filter(note_edit::Column::Target.eq(note.target.as_str()))
        .filter(note_edit::Column::PublicIdentifier.eq(note.public_identifier.as_str()))
        .order_by_desc(note_edit::Column::CreatedAt)
}

#[async_trait]
impl NoteEditRepository for PostgresNoteEditRepository {
    async fn count_since(&self, author_id: &str, since: DateTime<Utc>) -> Result<u64, RepoError> {
        tracing::debug!(author_id, %since, "Counting note edits");

        edits_since(author_id, since)
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn latest_for_note(
        &self,
        author_id: &str,
        note: &NoteKey,
    ) -> Result<Option<NoteEdit>, RepoError> {
        tracing::debug!(
            author_id,
            target = %note.target,
            public_identifier = %note.public_identifier,
            "Finding latest note edit"
        );

        let result = edits_of_note(author_id, note)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(NoteEdit::try_from).transpose()
    }

    async fn insert(&self, author_id: &str, note: &NoteKey) -> Result<NoteEdit, RepoError> {
        // created_at is left to the column default so the database clock orders edits.
        let active_model = note_edit::ActiveModel {
            id: Set(Uuid::new_v4()),
            author_id: Set(author_id.to_string()),
            target: Set(note.target.as_str().to_string()),
            public_identifier: Set(note.public_identifier.clone()),
            created_at: NotSet,
        };

        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(id = %model.id, author_id, "Note edit recorded");

        NoteEdit::try_from(model)
    }
}
