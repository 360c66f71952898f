use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the edit store database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Connection attempts before giving up at startup.
    pub connect_attempts: u32,
    /// Pause between two connection attempts.
    pub retry_delay: Duration,
}

/// Connect to the database, retrying while it comes up.
#[cfg(feature = "postgres")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let attempts = config.connect_attempts.max(1);
    let mut attempt = 1;
    loop {
        match Database::connect(opts.clone()).await {
            Ok(conn) => {
                tracing::info!(
                    "Database connected (pool: {}, attempt: {})",
                    config.max_connections,
                    attempt
                );
                return Ok(conn);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    attempts,
                    error = %e,
                    "Database not reachable yet, retrying"
                );
                tokio::time::sleep(config.retry_delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
