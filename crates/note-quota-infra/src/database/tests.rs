#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, QueryTrait, RuntimeErr, Value};

    use crate::database::entity::note_edit;
    use crate::database::postgres_repo::{
        PostgresNoteEditRepository, edits_of_note, edits_since,
    };
    use note_quota_core::RepoError;
    use note_quota_core::domain::{NoteKey, NoteTarget};
    use note_quota_core::ports::NoteEditRepository;

    fn model(target: &str, hour: u32) -> note_edit::Model {
        note_edit::Model {
            id: uuid::Uuid::new_v4(),
            author_id: "author-id-1".to_owned(),
            target: target.to_owned(),
            public_identifier: "public-identifier-1".to_owned(),
            created_at: Utc.with_ymd_and_hms(2021, 1, 3, hour, 0, 0).unwrap().into(),
        }
    }

    fn note() -> NoteKey {
        NoteKey::new(NoteTarget::User, "public-identifier-1")
    }

    #[tokio::test]
    async fn test_count_since() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(3)))])]])
            .into_connection();

        let repo = PostgresNoteEditRepository::new(db);
        let since = Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap();

        let count = repo.count_since("author-id-1", since).await.unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_latest_for_note() {
        let stored = model("user", 12);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .into_connection();

        let repo = PostgresNoteEditRepository::new(db);

        let latest = repo
            .latest_for_note("author-id-1", &note())
            .await
            .unwrap()
            .expect("edit found");

        assert_eq!(latest.id, stored.id);
        assert_eq!(latest.target, NoteTarget::User);
        assert_eq!(
            latest.created_at,
            Utc.with_ymd_and_hms(2021, 1, 3, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_latest_for_note_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<note_edit::Model>::new()])
            .into_connection();

        let repo = PostgresNoteEditRepository::new(db);

        let latest = repo.latest_for_note("author-id-1", &note()).await.unwrap();

        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn test_latest_for_note_rejects_unknown_target() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model("planet", 12)]])
            .into_connection();

        let repo = PostgresNoteEditRepository::new(db);

        let result = repo.latest_for_note("author-id-1", &note()).await;

        assert!(matches!(result, Err(RepoError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_insert_returns_store_assigned_fields() {
        let stored = model("user", 15);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .into_connection();

        let repo = PostgresNoteEditRepository::new(db);

        let created = repo.insert("author-id-1", &note()).await.unwrap();

        assert_eq!(created.id, stored.id);
        assert_eq!(created.author_id, "author-id-1");
        assert_eq!(created.public_identifier, "public-identifier-1");
        assert_eq!(
            created.created_at,
            Utc.with_ymd_and_hms(2021, 1, 3, 15, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_connection_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
                "connection refused".to_owned(),
            ))])
            .into_connection();

        let repo = PostgresNoteEditRepository::new(db);
        let since = Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap();

        let result = repo.count_since("author-id-1", since).await;

        assert!(matches!(result, Err(RepoError::Connection(_))));
    }

    #[test]
    fn test_count_query_filters_author_and_inclusive_cutoff() {
        let since = Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap();
        let stmt = edits_since("author-id-1", since).build(DatabaseBackend::Postgres);

        assert!(
            stmt.sql
                .ends_with(r#"WHERE "note_edits"."author_id" = $1 AND "note_edits"."created_at" >= $2"#),
            "{}",
            stmt.sql
        );
        assert_eq!(stmt.values.map(|v| v.0.len()), Some(2));
    }

    #[test]
    fn test_latest_query_matches_note_key_newest_first() {
        let stmt = edits_of_note("author-id-1", &note()).build(DatabaseBackend::Postgres);

        assert!(
            stmt.sql.ends_with(concat!(
                r#"WHERE "note_edits"."author_id" = $1"#,
                r#" AND "note_edits"."target" = $2"#,
                r#" AND "note_edits"."public_identifier" = $3"#,
                r#" ORDER BY "note_edits"."created_at" DESC"#,
            )),
            "{}",
            stmt.sql
        );
        assert_eq!(stmt.values.map(|v| v.0.len()), Some(3));
    }
}
