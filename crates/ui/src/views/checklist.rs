#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use checklist_core::model::LanguageMode;
use dioxus::prelude::*;
use futures::StreamExt;
use services::{ChecklistStore, ProgressEvent};

use crate::context::AppContext;
use crate::views::{LanguageToggle, ResetModal, SectionCard};
use crate::vm::{ChecklistIntent, ChecklistUiState, ChecklistVm, dispatch, map_checklist};

/// Stateful checklist screen: owns the store, the UI state and the writer.
#[component]
pub fn ChecklistView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress_service();

    // One consumer applies events in arrival order, so saves never race.
    let writer = use_coroutine(move |mut rx: UnboundedReceiver<ProgressEvent>| {
        let progress = progress.clone();
        async move {
            while let Some(event) = rx.next().await {
                if let Err(err) = progress.apply(&event).await {
                    tracing::warn!(error = %err, "progress change was not persisted");
                }
            }
        }
    });

    let store = use_signal(|| {
        let mut store = ChecklistStore::new(ctx.initial_progress().clone());
        store.subscribe(move |event| writer.send(event.clone()));
        store
    });
    let ui_state = use_signal(ChecklistUiState::default);

    let intent_catalog = catalog.clone();
    let dispatch_intent = use_callback(move |intent: ChecklistIntent| {
        let mut store = store;
        let mut ui_state = ui_state;
        dispatch(
            &mut store.write(),
            &mut ui_state.write(),
            &intent_catalog,
            intent,
        );
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ChecklistTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let vm = map_checklist(&catalog, store.read().snapshot());
    let ui = ui_state();

    rsx! {
        ChecklistPage { vm, ui, on_intent: dispatch_intent }
    }
}

#[component]
pub fn ChecklistPage(
    vm: ChecklistVm,
    ui: ChecklistUiState,
    on_intent: Callback<ChecklistIntent>,
) -> Element {
    let language = ui.language;
    let generation = ui.generation;
    let root_class = format!("checklist {}", language.css_class());
    let sections = vm.sections.iter().map(|section| {
        let node_key = format!("{generation}-{}", section.key);
        rsx! {
            SectionCard {
                key: "{node_key}",
                section: section.clone(),
                language,
                on_intent,
            }
        }
    });

    rsx! {
        div { class: "{root_class}",
            header { class: "checklist-header",
                div { class: "checklist-heading",
                    h1 { class: "checklist-title", "Bathroom Renovation Checklist" }
                    p { class: "checklist-subtitle", "Lista de remodelación del baño" }
                }
                div { id: "overall", class: "overall", "Overall: {vm.overall}" }
            }
            div { class: "toolbar",
                LanguageToggle {
                    mode: language,
                    on_select: move |mode: LanguageMode| on_intent.call(ChecklistIntent::SelectLanguage(mode)),
                }
                div { class: "global-actions",
                    button {
                        id: "markAll",
                        class: "btn success",
                        r#type: "button",
                        onclick: move |_| on_intent.call(ChecklistIntent::SetAll { done: true }),
                        "Mark All"
                    }
                    button {
                        id: "unmarkAll",
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| on_intent.call(ChecklistIntent::SetAll { done: false }),
                        "Unmark All"
                    }
                    button {
                        id: "reset",
                        class: "btn danger",
                        r#type: "button",
                        onclick: move |_| on_intent.call(ChecklistIntent::RequestReset),
                        "Reset"
                    }
                }
            }
            div { id: "sections", class: "sections", {sections} }
            if ui.confirming_reset {
                ResetModal {
                    on_cancel: move |()| on_intent.call(ChecklistIntent::CancelReset),
                    on_confirm: move |()| on_intent.call(ChecklistIntent::ConfirmReset),
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ChecklistTestHandles {
    dispatch: Rc<RefCell<Option<Callback<ChecklistIntent>>>>,
}

#[cfg(test)]
impl ChecklistTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<ChecklistIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<ChecklistIntent> {
        (*self.dispatch.borrow()).expect("checklist dispatch registered")
    }
}
