use std::sync::Arc;

use checklist_core::model::{Catalog, ProgressState};
use services::ProgressService;

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<Catalog>;
    fn progress_service(&self) -> Arc<ProgressService>;

    /// Progress loaded once at startup, before the window opens.
    fn initial_progress(&self) -> ProgressState;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    initial_progress: ProgressState,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            progress: app.progress_service(),
            initial_progress: app.initial_progress(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress_service(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn initial_progress(&self) -> &ProgressState {
        &self.initial_progress
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
