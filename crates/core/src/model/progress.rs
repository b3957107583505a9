use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::StepId;

/// Completion flags keyed by step identifier.
///
/// Serializes as one flat object (`{"demolition-0": true, ...}`). A missing
/// key means "not done". Keys that no longer match a catalog step are kept
/// as-is so saving never drops data it did not understand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressState {
    entries: BTreeMap<String, bool>,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_done(&self, id: &StepId) -> bool {
        self.entries.get(&id.to_string()).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: &StepId, done: bool) {
        self.entries.insert(id.to_string(), done);
    }

    pub fn set_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a StepId>, done: bool) {
        for id in ids {
            self.set(id, done);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored entries, including ones explicitly set to false.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Raw persisted entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(key, done)| (key.as_str(), *done))
    }
}

/// Builds a state from raw persisted keys, which need not parse as `StepId`.
impl FromIterator<(String, bool)> for ProgressState {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
