//! NoteEdit entity for SeaORM.

use sea_orm::entity::prelude::*;

use note_quota_core::RepoError;
use note_quota_core::domain::{NoteEdit, NoteTarget};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "note_edits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: String,
    pub target: String,
    pub public_identifier: String,
    /// Defaults to `now()` in the database.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain NoteEdit.
///
/// Fails on a target outside the known set instead of coercing it.
impl TryFrom<Model> for NoteEdit {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let target: NoteTarget = model.target.parse().map_err(|_| {
            RepoError::InvalidRecord(format!(
                "note edit {} has unknown target {:?}",
                model.id, model.target
            ))
        })?;

        Ok(Self {
            id: model.id,
            author_id: model.author_id,
            target,
            public_identifier: model.public_identifier,
            created_at: model.created_at.into(),
        })
    }
}
