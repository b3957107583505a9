use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::{SectionKey, StepId};

const BUNDLED_CATALOG: &str = include_str!("../../catalog/renovation.toml");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog could not be parsed: {0}")]
    Parse(String),

    #[error("catalog must contain at least one section")]
    Empty,

    #[error("section #{position} has a blank key")]
    BlankSectionKey { position: usize },

    #[error("section key {key:?} must not contain whitespace")]
    InvalidSectionKey { key: String },

    #[error("section key {key:?} is used more than once")]
    DuplicateSectionKey { key: String },

    #[error("section {key:?} has no steps")]
    EmptySection { key: String },

    #[error("section {key:?} step {number} is missing its {language} text")]
    BlankStepText {
        key: String,
        number: usize,
        language: &'static str,
    },
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Unvalidated catalog as read from configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDraft {
    #[serde(default)]
    pub sections: Vec<SectionDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionDraft {
    pub key: String,
    pub title_en: String,
    pub title_es: String,
    #[serde(default)]
    pub steps: Vec<StepDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepDraft {
    pub en: String,
    pub es: String,
}

impl CatalogDraft {
    /// Parse a draft from TOML (`[[sections]]` tables with nested `[[sections.steps]]`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not valid TOML for this shape.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        toml::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))
    }

    /// Validate the draft into an immutable catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for an empty catalog, blank/duplicate/whitespace
    /// section keys, sections without steps, or steps with blank text.
    pub fn validate(self) -> Result<Catalog, CatalogError> {
        if self.sections.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut sections = Vec::with_capacity(self.sections.len());
        for (position, draft) in self.sections.into_iter().enumerate() {
            let key = draft.key.trim().to_string();
            if key.is_empty() {
                return Err(CatalogError::BlankSectionKey {
                    position: position + 1,
                });
            }
            if key.chars().any(char::is_whitespace) {
                return Err(CatalogError::InvalidSectionKey { key });
            }
            if !seen.insert(key.clone()) {
                return Err(CatalogError::DuplicateSectionKey { key });
            }
            if draft.steps.is_empty() {
                return Err(CatalogError::EmptySection { key });
            }

            let mut steps = Vec::with_capacity(draft.steps.len());
            for (index, step) in draft.steps.into_iter().enumerate() {
                let en = step.en.trim().to_string();
                let es = step.es.trim().to_string();
                for (text, language) in [(&en, "English"), (&es, "Spanish")] {
                    if text.is_empty() {
                        return Err(CatalogError::BlankStepText {
                            key,
                            number: index + 1,
                            language,
                        });
                    }
                }
                steps.push(Step { en, es });
            }

            sections.push(Section {
                key: SectionKey::new(key),
                title_en: draft.title_en.trim().to_string(),
                title_es: draft.title_es.trim().to_string(),
                steps,
            });
        }

        Ok(Catalog { sections })
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// One bilingual instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    en: String,
    es: String,
}

impl Step {
    #[must_use]
    pub fn en(&self) -> &str {
        &self.en
    }

    #[must_use]
    pub fn es(&self) -> &str {
        &self.es
    }
}

/// A named renovation phase with its ordered steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    key: SectionKey,
    title_en: String,
    title_es: String,
    steps: Vec<Step>,
}

impl Section {
    #[must_use]
    pub fn key(&self) -> &SectionKey {
        &self.key
    }

    #[must_use]
    pub fn title_en(&self) -> &str {
        &self.title_en
    }

    #[must_use]
    pub fn title_es(&self) -> &str {
        &self.title_es
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Step identifiers in display order.
    pub fn step_ids(&self) -> impl Iterator<Item = StepId> + '_ {
        (0..self.steps.len()).map(|index| self.key.step(index))
    }
}

/// The validated, ordered task catalog. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// The renovation checklist compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded document fails validation.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUNDLED_CATALOG)
    }

    /// Parse and validate a catalog from TOML.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on parse or validation failure.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        CatalogDraft::from_toml_str(raw)?.validate()
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, key: &SectionKey) -> Option<&Section> {
        self.sections.iter().find(|section| section.key() == key)
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.sections.iter().map(Section::step_count).sum()
    }

    /// Every step identifier, section by section.
    pub fn step_ids(&self) -> impl Iterator<Item = StepId> + '_ {
        self.sections.iter().flat_map(Section::step_ids)
    }
}
