use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{KeyValueRepository, Storage};

mod kv_repo;
mod migrate;

/// Applied to every pooled connection before first use.
const CONNECTION_PRAGMAS: [&str; 2] = ["PRAGMA journal_mode = WAL;", "PRAGMA busy_timeout = 5000;"];

/// Key/value blobs in a single `kv_store` table.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Open a one-connection pool on `database_url`.
    ///
    /// Progress writes are serialized upstream, so a single connection is
    /// enough. It is never recycled, which also keeps `sqlite::memory:`
    /// databases alive for the life of the repository.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the database cannot be opened or a
    /// connection pragma is rejected.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(None)
            .max_lifetime(None)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in CONNECTION_PRAGMAS {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        tracing::debug!(database_url, "progress database opened");
        Ok(Self { pool })
    }

    /// Bring `kv_store` up to the latest schema version.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if a migration statement fails.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Open, migrate and wrap a `SqliteRepository`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` from either `connect` or `migrate`.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        Ok(Self {
            blobs: Arc::new(repo) as Arc<dyn KeyValueRepository>,
        })
    }
}
