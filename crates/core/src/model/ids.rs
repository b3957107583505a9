use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a checklist section (e.g. `tile-prep`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKey(String);

impl SectionKey {
    /// Creates a new `SectionKey`
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of the step at `index` (0-based) inside this section.
    #[must_use]
    pub fn step(&self, index: usize) -> StepId {
        StepId::new(self.clone(), index)
    }
}

/// Persistence key of a single step: `<section key>-<0-based index>`.
///
/// Section keys and step order must stay stable across releases, otherwise
/// previously saved progress no longer matches and reads as unchecked.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId {
    section: SectionKey,
    index: usize,
}

impl StepId {
    #[must_use]
    pub fn new(section: SectionKey, index: usize) -> Self {
        Self { section, index }
    }

    #[must_use]
    pub fn section(&self) -> &SectionKey {
        &self.section
    }

    /// 0-based position within the owning section.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based number shown next to the step text.
    #[must_use]
    pub fn display_number(&self) -> usize {
        self.index + 1
    }
}

impl fmt::Debug for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionKey({})", self.0)
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({self})")
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section, self.index)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing a `StepId` from its persisted form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid step id: {raw}")]
pub struct ParseStepIdError {
    raw: String,
}

impl FromStr for StepId {
    type Err = ParseStepIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseStepIdError { raw: s.to_string() };
        // Section keys may contain '-', so the index is after the last one.
        let (key, index) = s.rsplit_once('-').ok_or_else(invalid)?;
        if key.is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // "x-01" would display as "x-1"; only the canonical form parses.
        if index.len() > 1 && index.starts_with('0') {
            return Err(invalid());
        }
        let index = index.parse::<usize>().map_err(|_| invalid())?;
        Ok(StepId::new(SectionKey::new(key), index))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
