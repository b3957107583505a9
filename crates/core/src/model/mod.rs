mod catalog;
mod ids;
mod language;
mod progress;
mod report;

pub use catalog::{Catalog, CatalogDraft, CatalogError, Section, SectionDraft, Step, StepDraft};
pub use ids::{ParseStepIdError, SectionKey, StepId};
pub use language::LanguageMode;
pub use progress::ProgressState;
pub use report::{ProgressReport, SectionProgress, Tally};
