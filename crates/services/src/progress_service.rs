use std::sync::Arc;

use checklist_core::model::ProgressState;
use serde_json::{Map, Value};
use storage::repository::KeyValueRepository;

use crate::checklist_store::ProgressEvent;
use crate::error::ProgressServiceError;

/// Storage key of the progress blob.
pub const PROGRESS_STORAGE_KEY: &str = "cs_bilingual_checklist_v1";

/// Loads and persists the whole progress map as one JSON blob.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self {
            repo,
            key: PROGRESS_STORAGE_KEY.to_string(),
        }
    }

    /// Load saved progress.
    ///
    /// Never fails. A missing blob, an unreadable backend or content that is
    /// not a JSON object yields an empty state. Inside an object, entries
    /// whose value is not a boolean are skipped and the rest are kept.
    pub async fn load(&self) -> ProgressState {
        let raw = match self.repo.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressState::new(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "progress unreadable, starting empty");
                return ProgressState::new();
            }
        };

        if raw.trim().is_empty() {
            return ProgressState::new();
        }

        let object = match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(object) => object,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "progress malformed, starting empty");
                return ProgressState::new();
            }
        };

        let stored = object.len();
        let state: ProgressState = object
            .into_iter()
            .filter_map(|(id, value)| value.as_bool().map(|done| (id, done)))
            .collect();
        let skipped = stored - state.len();
        if skipped > 0 {
            tracing::warn!(key = %self.key, skipped, "ignored progress entries that are not booleans");
        }
        tracing::debug!(key = %self.key, entries = state.len(), "progress loaded");
        state
    }

    /// Overwrite the stored blob with the full map.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if encoding or the write fails.
    pub async fn save(&self, state: &ProgressState) -> Result<(), ProgressServiceError> {
        let raw = serde_json::to_string(state)?;
        self.repo.set(&self.key, &raw).await?;
        tracing::debug!(key = %self.key, entries = state.len(), "progress saved");
        Ok(())
    }

    /// Delete the stored blob entirely.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the backend cannot be written.
    pub async fn clear(&self) -> Result<(), ProgressServiceError> {
        self.repo.remove(&self.key).await?;
        tracing::debug!(key = %self.key, "progress cleared");
        Ok(())
    }

    /// Persist one store notification.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the underlying save or clear fails.
    pub async fn apply(&self, event: &ProgressEvent) -> Result<(), ProgressServiceError> {
        match event {
            ProgressEvent::Updated(state) => self.save(state).await,
            ProgressEvent::Cleared => self.clear().await,
        }
    }
}
