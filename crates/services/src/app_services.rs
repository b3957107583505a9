use std::sync::Arc;

use checklist_core::model::{Catalog, ProgressState};
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services around a validated catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, catalog: Catalog) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, catalog))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, catalog: Catalog) -> Self {
        let progress = Arc::new(ProgressService::new(Arc::clone(&storage.blobs)));
        Self {
            catalog: Arc::new(catalog),
            progress,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Progress to seed the UI with. Fails soft like `ProgressService::load`.
    pub async fn initial_progress(&self) -> ProgressState {
        self.progress.load().await
    }
}
