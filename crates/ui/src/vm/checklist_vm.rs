use checklist_core::model::{
    Catalog, LanguageMode, ProgressReport, ProgressState, Section, SectionKey, StepId,
};
use services::ChecklistStore;

/// Everything a user can do on the checklist screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChecklistIntent {
    Toggle { id: StepId, done: bool },
    SetSection { key: SectionKey, done: bool },
    SetAll { done: bool },
    SelectLanguage(LanguageMode),
    RequestReset,
    CancelReset,
    ConfirmReset,
}

/// Presentation state that is never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChecklistUiState {
    pub language: LanguageMode,
    /// Bumped on reset; section nodes are keyed by it so the tree is rebuilt.
    pub generation: u32,
    pub confirming_reset: bool,
}

/// Apply one intent. Progress changes go through the store only.
pub fn dispatch(
    store: &mut ChecklistStore,
    ui: &mut ChecklistUiState,
    catalog: &Catalog,
    intent: ChecklistIntent,
) {
    match intent {
        ChecklistIntent::Toggle { id, done } => store.set_one(&id, done),
        ChecklistIntent::SetSection { key, done } => match catalog.section(&key) {
            Some(section) => {
                let ids: Vec<StepId> = section.step_ids().collect();
                store.set_many(&ids, done);
            }
            None => tracing::warn!(section = %key, "ignoring unknown section"),
        },
        ChecklistIntent::SetAll { done } => {
            let ids: Vec<StepId> = catalog.step_ids().collect();
            store.set_many(&ids, done);
        }
        ChecklistIntent::SelectLanguage(mode) => ui.language = mode,
        ChecklistIntent::RequestReset => ui.confirming_reset = true,
        ChecklistIntent::CancelReset => ui.confirming_reset = false,
        ChecklistIntent::ConfirmReset => {
            if ui.confirming_reset {
                store.clear();
                ui.generation = ui.generation.wrapping_add(1);
                ui.confirming_reset = false;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepVm {
    pub id: StepId,
    /// Element id, also the `for` target of the label.
    pub dom_id: String,
    pub en_label: String,
    pub es_label: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionVm {
    pub key: SectionKey,
    pub title: String,
    pub counter: String,
    pub complete: bool,
    pub open_by_default: bool,
    pub steps: Vec<StepVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistVm {
    pub sections: Vec<SectionVm>,
    pub overall: String,
}

/// Project catalog + progress into render-ready rows and counters.
#[must_use]
pub fn map_checklist(catalog: &Catalog, state: &ProgressState) -> ChecklistVm {
    let report = ProgressReport::compute(catalog, state);
    let sections = catalog
        .sections()
        .iter()
        .enumerate()
        .map(|(position, section)| {
            let tally = report.section(section.key()).unwrap_or_default();
            SectionVm {
                key: section.key().clone(),
                title: format!("{} / {}", section.title_en(), section.title_es()),
                counter: tally.to_string(),
                complete: tally.is_complete(),
                open_by_default: position == 0,
                steps: map_steps(section, state),
            }
        })
        .collect();

    ChecklistVm {
        sections,
        overall: report.overall().to_string(),
    }
}

fn map_steps(section: &Section, state: &ProgressState) -> Vec<StepVm> {
    section
        .steps()
        .iter()
        .zip(section.step_ids())
        .map(|(step, id)| {
            let number = id.display_number();
            StepVm {
                dom_id: id.to_string(),
                en_label: format!("{number}. {}", step.en()),
                es_label: format!("{number}. {}", step.es()),
                checked: state.is_done(&id),
                id,
            }
        })
        .collect()
}
