mod checklist_vm;

pub use checklist_vm::{
    ChecklistIntent, ChecklistUiState, ChecklistVm, SectionVm, StepVm, dispatch, map_checklist,
};
