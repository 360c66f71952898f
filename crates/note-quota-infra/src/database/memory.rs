//! In-memory edit store - used when no database is configured.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use note_quota_core::RepoError;
use note_quota_core::domain::{NoteEdit, NoteKey};
use note_quota_core::ports::NoteEditRepository;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// In-memory note edit store backed by an append-only `Vec`.
///
/// Note: Data is lost on process restart, and quotas are per-process.
pub struct InMemoryNoteEditRepository {
    edits: RwLock<Vec<NoteEdit>>,
    clock: Clock,
}

impl InMemoryNoteEditRepository {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Use `clock` to stamp inserted edits instead of the system time.
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            edits: RwLock::new(Vec::new()),
            clock: Arc::new(clock),
        }
    }

    pub async fn len(&self) -> usize {
        self.edits.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.edits.read().await.is_empty()
    }
}

impl Default for InMemoryNoteEditRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteEditRepository for InMemoryNoteEditRepository {
    async fn count_since(&self, author_id: &str, since: DateTime<Utc>) -> Result<u64, RepoError> {
        let edits = self.edits.read().await;
        let count = edits
            .iter()
            .filter(|edit| edit.author_id == author_id && edit.created_at >= since)
            .count();

        Ok(count as u64)
    }

    async fn latest_for_note(
        &self,
        author_id: &str,
        note: &NoteKey,
    ) -> Result<Option<NoteEdit>, RepoError> {
        let edits = self.edits.read().await;
        let latest = edits
            .iter()
            .filter(|edit| edit.is_for(author_id, note))
            .max_by_key(|edit| edit.created_at)
            .cloned();

        Ok(latest)
    }

    async fn insert(&self, author_id: &str, note: &NoteKey) -> Result<NoteEdit, RepoError> {
        let mut edits = self.edits.write().await;

        // Creation times never go backwards in insertion order.
        let now = (self.clock)();
        let created_at = edits
            .last()
            .map(|last| last.created_at.max(now))
            .unwrap_or(now);

        let edit = NoteEdit {
            id: Uuid::new_v4(),
            author_id: author_id.to_string(),
            target: note.target,
            public_identifier: note.public_identifier.clone(),
            created_at,
        };
        edits.push(edit.clone());

        Ok(edit)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone};

    use note_quota_core::domain::{NoteEditRequest, NoteTarget, NoteTierLimits};
    use note_quota_core::{CanUpdateNoteService, DomainError};

    use super::*;

    /// A store whose clock the test moves by hand.
    fn manual_clock() -> (Arc<InMemoryNoteEditRepository>, Arc<Mutex<DateTime<Utc>>>) {
        let clock = Arc::new(Mutex::new(
            Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        ));
        let handle = clock.clone();
        let repo = InMemoryNoteEditRepository::with_clock(move || *handle.lock().unwrap());
        (Arc::new(repo), clock)
    }

    fn advance(clock: &Mutex<DateTime<Utc>>, by: Duration) -> DateTime<Utc> {
        let mut now = clock.lock().unwrap();
        *now += by;
        *now
    }

    fn key(public_identifier: &str) -> NoteKey {
        NoteKey::new(NoteTarget::User, public_identifier)
    }

    fn edit(author_id: &str, public_identifier: &str) -> NoteEditRequest {
        NoteEditRequest {
            author_id: author_id.to_string(),
            target: Some("user".to_string()),
            public_identifier: Some(public_identifier.to_string()),
            read_only: false,
        }
    }

    fn read_only(author_id: &str) -> NoteEditRequest {
        NoteEditRequest {
            author_id: author_id.to_string(),
            read_only: true,
            ..Default::default()
        }
    }

    fn day_window(max_edits: u32) -> NoteTierLimits {
        NoteTierLimits::new(max_edits, Duration::hours(24))
    }

    #[tokio::test]
    async fn count_since_filters_by_author_and_cutoff() {
        let (repo, clock) = manual_clock();
        repo.insert("author-id-1", &key("a")).await.unwrap();
        let second = advance(&clock, Duration::hours(1));
        repo.insert("author-id-1", &key("b")).await.unwrap();
        repo.insert("author-id-2", &key("a")).await.unwrap();

        let all = repo
            .count_since("author-id-1", second - Duration::hours(2))
            .await
            .unwrap();
        assert_eq!(all, 2);

        // The cutoff is inclusive.
        let from_second = repo.count_since("author-id-1", second).await.unwrap();
        assert_eq!(from_second, 1);

        let after_all = repo
            .count_since("author-id-1", second + Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(after_all, 0);
    }

    #[tokio::test]
    async fn latest_for_note_matches_the_whole_key() {
        let (repo, clock) = manual_clock();
        repo.insert("author-id-1", &key("a")).await.unwrap();
        advance(&clock, Duration::hours(1));
        let newest = repo.insert("author-id-1", &key("a")).await.unwrap();
        advance(&clock, Duration::hours(1));
        repo.insert("author-id-1", &key("b")).await.unwrap();
        repo.insert("author-id-2", &key("a")).await.unwrap();
        repo.insert("author-id-1", &NoteKey::new(NoteTarget::Company, "a"))
            .await
            .unwrap();

        let latest = repo.latest_for_note("author-id-1", &key("a")).await.unwrap();
        assert_eq!(latest, Some(newest));
    }

    #[tokio::test]
    async fn latest_for_note_without_match_is_none() {
        let (repo, _) = manual_clock();
        repo.insert("author-id-1", &key("a")).await.unwrap();

        let latest = repo.latest_for_note("author-id-1", &key("z")).await.unwrap();
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn insert_never_moves_creation_time_backwards() {
        let (repo, clock) = manual_clock();
        let first = repo.insert("author-id-1", &key("a")).await.unwrap();
        advance(&clock, -Duration::minutes(5));
        let second = repo.insert("author-id-1", &key("b")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn permits_max_edits_then_denies() {
        let (repo, clock) = manual_clock();
        let service = CanUpdateNoteService::new(repo.clone());
        let limits = day_window(3);

        let mut remaining = Vec::new();
        for note in ["a", "b", "c"] {
            let now = advance(&clock, Duration::minutes(1));
            remaining.push(service.decide(&edit("author-id-1", note), &limits, now).await.unwrap());
        }
        assert_eq!(remaining, vec![2, 1, 0]);

        let now = advance(&clock, Duration::minutes(1));
        let denied = service.decide(&edit("author-id-1", "d"), &limits, now).await;
        assert!(matches!(denied, Err(DomainError::QuotaExhausted)));
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn same_note_within_buffer_is_free_but_other_notes_are_denied() {
        let (repo, clock) = manual_clock();
        let service = CanUpdateNoteService::new(repo.clone());
        let limits = day_window(1);

        let now = advance(&clock, Duration::minutes(1));
        let first = service.decide(&edit("author-id-1", "a"), &limits, now).await;
        assert_eq!(first.unwrap(), 0);

        let now = advance(&clock, Duration::minutes(10));
        let again = service.decide(&edit("author-id-1", "a"), &limits, now).await;
        assert_eq!(again.unwrap(), 0);

        let other = service.decide(&edit("author-id-1", "b"), &limits, now).await;
        assert!(matches!(other, Err(DomainError::QuotaExhausted)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn exhausted_author_keeps_editing_recent_note() {
        let (repo, clock) = manual_clock();
        let service = CanUpdateNoteService::new(repo.clone());
        let limits = day_window(5);

        // Five edits two hours apart, all inside the day window.
        for note in ["a", "b", "c", "d", "e"] {
            let now = advance(&clock, Duration::hours(2));
            service.decide(&edit("author-id-1", note), &limits, now).await.unwrap();
        }

        let now = *clock.lock().unwrap() + Duration::minutes(5);
        let remaining = service.decide(&read_only("author-id-1"), &limits, now).await;
        assert_eq!(remaining.unwrap(), 0);

        let brand_new = service.decide(&edit("author-id-1", "f"), &limits, now).await;
        assert!(matches!(brand_new, Err(DomainError::QuotaExhausted)));

        let recent = service.decide(&edit("author-id-1", "e"), &limits, now).await;
        assert_eq!(recent.unwrap(), 0);
        assert_eq!(repo.len().await, 5);
    }

    #[tokio::test]
    async fn edits_leave_the_window_over_time() {
        let (repo, clock) = manual_clock();
        let service = CanUpdateNoteService::new(repo.clone());
        let limits = day_window(1);

        let now = advance(&clock, Duration::minutes(1));
        service.decide(&edit("author-id-1", "a"), &limits, now).await.unwrap();

        let now = advance(&clock, Duration::hours(25));
        let remaining = service.decide(&edit("author-id-1", "b"), &limits, now).await;
        assert_eq!(remaining.unwrap(), 0);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn read_only_is_idempotent_and_never_records() {
        let (repo, clock) = manual_clock();
        let service = CanUpdateNoteService::new(repo.clone());
        let limits = day_window(2);

        let now = advance(&clock, Duration::minutes(1));
        service.decide(&edit("author-id-1", "a"), &limits, now).await.unwrap();

        for _ in 0..3 {
            let remaining = service.decide(&read_only("author-id-1"), &limits, now).await;
            assert_eq!(remaining.unwrap(), 1);
        }
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn lowered_limit_reports_zero_not_negative() {
        let (repo, clock) = manual_clock();
        let service = CanUpdateNoteService::new(repo.clone());

        for note in ["a", "b", "c"] {
            let now = advance(&clock, Duration::minutes(1));
            service.decide(&edit("author-id-1", note), &day_window(5), now).await.unwrap();
        }

        let now = advance(&clock, Duration::minutes(1));
        let remaining = service.decide(&read_only("author-id-1"), &day_window(1), now).await;
        assert_eq!(remaining.unwrap(), 0);
    }
}
