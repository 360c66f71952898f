use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NoteEdits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NoteEdits::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(NoteEdits::AuthorId).string_len(255).not_null())
                    .col(ColumnDef::new(NoteEdits::Target).string_len(16).not_null())
                    .col(
                        ColumnDef::new(NoteEdits::PublicIdentifier)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NoteEdits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Window counts.
        manager
            .create_index(
                Index::create()
                    .name("idx_note_edits_author_created_at")
                    .table(NoteEdits::Table)
                    .col(NoteEdits::AuthorId)
                    .col(NoteEdits::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Latest edit of one note.
        manager
            .create_index(
                Index::create()
                    .name("idx_note_edits_note_created_at")
                    .table(NoteEdits::Table)
                    .col(NoteEdits::AuthorId)
                    .col(NoteEdits::Target)
                    .col(NoteEdits::PublicIdentifier)
                    .col(NoteEdits::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NoteEdits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NoteEdits {
    Table,
    Id,
    AuthorId,
    Target,
    PublicIdentifier,
    CreatedAt,
}
