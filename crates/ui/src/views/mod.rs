mod checklist;
mod language;
mod reset_modal;
mod section;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use checklist::{ChecklistPage, ChecklistView};
pub use language::LanguageToggle;
pub use reset_modal::ResetModal;
pub use section::SectionCard;
