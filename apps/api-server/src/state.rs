//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use note_quota_core::CanUpdateNoteService;
use note_quota_core::domain::TierInformation;
use note_quota_core::ports::NoteEditRepository;
use note_quota_infra::InMemoryNoteEditRepository;

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use note_quota_infra::{PostgresNoteEditRepository, database::connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub notes: CanUpdateNoteService,
    pub free_tier: TierInformation,
    pub request_timeout: Duration,
    /// Name of the edit store backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (edits, storage) = Self::edit_store(config).await?;

        tracing::info!(storage, "Application state initialized");

        Ok(Self::with_store(config, edits, storage))
    }

    /// Build the state around an existing edit store.
    pub fn with_store(
        config: &AppConfig,
        edits: Arc<dyn NoteEditRepository>,
        storage: &'static str,
    ) -> Self {
        Self {
            notes: CanUpdateNoteService::new(edits),
            free_tier: config.free_tier,
            request_timeout: config.request_timeout,
            storage,
        }
    }

    #[cfg(feature = "postgres")]
    async fn edit_store(
        config: &AppConfig,
    ) -> anyhow::Result<(Arc<dyn NoteEditRepository>, &'static str)> {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok((Arc::new(InMemoryNoteEditRepository::new()), "memory"));
        };

        // Quotas are not per-process, so an unreachable database is fatal.
        let conn = connect(db_config).await?;

        if config.run_migrations {
            tracing::info!("Applying pending migrations");
            Migrator::up(&conn, None).await?;
        }

        Ok((Arc::new(PostgresNoteEditRepository::new(conn)), "postgres"))
    }

    #[cfg(not(feature = "postgres"))]
    async fn edit_store(
        config: &AppConfig,
    ) -> anyhow::Result<(Arc<dyn NoteEditRepository>, &'static str)> {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored - built without postgres feature");
        }
        if config.run_migrations {
            tracing::debug!("RUN_MIGRATIONS ignored - nothing to migrate in memory");
        }
        tracing::info!("Running without postgres feature - using in-memory edit store");
        Ok((Arc::new(InMemoryNoteEditRepository::new()), "memory"))
    }
}
