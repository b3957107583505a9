use std::fmt;
use std::ops::AddAssign;

use crate::model::catalog::Catalog;
use crate::model::ids::SectionKey;
use crate::model::progress::ProgressState;

/// A `done / total` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub done: usize,
    pub total: usize,
}

impl Tally {
    #[must_use]
    pub fn new(done: usize, total: usize) -> Self {
        Self { done, total }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.done == self.total
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.done += rhs.done;
        self.total += rhs.total;
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.done, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionProgress {
    pub key: SectionKey,
    pub tally: Tally,
}

/// Per-section and overall completion counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    sections: Vec<SectionProgress>,
    overall: Tally,
}

impl ProgressReport {
    /// Recount everything from the catalog and the current state.
    ///
    /// Totals come from the catalog alone, so state entries for unknown
    /// steps never change a denominator.
    #[must_use]
    pub fn compute(catalog: &Catalog, state: &ProgressState) -> Self {
        let mut overall = Tally::default();
        let sections = catalog
            .sections()
            .iter()
            .map(|section| {
                let done = section.step_ids().filter(|id| state.is_done(id)).count();
                let tally = Tally::new(done, section.step_count());
                overall += tally;
                SectionProgress {
                    key: section.key().clone(),
                    tally,
                }
            })
            .collect();
        Self { sections, overall }
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionProgress] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, key: &SectionKey) -> Option<Tally> {
        self.sections
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| entry.tally)
    }

    #[must_use]
    pub fn overall(&self) -> Tally {
        self.overall
    }
}
