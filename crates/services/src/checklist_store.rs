//! The single owner of in-session progress.
//!
//! Every UI handler mutates progress through `ChecklistStore`; listeners
//! registered with `subscribe` (the persistence writer, in the app) see each
//! change as a `ProgressEvent` in the order it happened.

use std::fmt;

use checklist_core::model::{ProgressState, StepId};

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Full snapshot after a mutation.
    Updated(ProgressState),
    /// All progress was discarded; the stored blob should be deleted.
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ProgressEvent)>;

pub struct ChecklistStore {
    state: ProgressState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ChecklistStore {
    /// Seed the store with previously loaded progress.
    #[must_use]
    pub fn new(state: ProgressState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn get(&self, id: &StepId) -> bool {
        self.state.is_done(id)
    }

    #[must_use]
    pub fn snapshot(&self) -> &ProgressState {
        &self.state
    }

    pub fn set_one(&mut self, id: &StepId, done: bool) {
        tracing::debug!(step = %id, done, "set step");
        self.state.set(id, done);
        self.publish_update();
    }

    pub fn set_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a StepId>, done: bool) {
        let mut count = 0_usize;
        for id in ids {
            self.state.set(id, done);
            count += 1;
        }
        tracing::debug!(count, done, "set steps");
        self.publish_update();
    }

    /// Drop every entry, including ones for steps no longer in the catalog.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.state.len(), "clear progress");
        self.state.clear();
        self.publish(&ProgressEvent::Cleared);
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ProgressEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn publish_update(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let event = ProgressEvent::Updated(self.state.clone());
        self.publish(&event);
    }

    fn publish(&mut self, event: &ProgressEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for ChecklistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecklistStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
