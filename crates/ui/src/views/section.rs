use checklist_core::model::LanguageMode;
use dioxus::prelude::*;

use crate::vm::{ChecklistIntent, SectionVm};

#[component]
pub fn SectionCard(
    section: SectionVm,
    language: LanguageMode,
    on_intent: Callback<ChecklistIntent>,
) -> Element {
    let card_class = if section.complete {
        "card card--complete"
    } else {
        "card"
    };
    let mark_key = section.key.clone();
    let unmark_key = section.key.clone();

    let steps = section.steps.iter().map(|step| {
        let id = step.id.clone();
        rsx! {
            div { key: "{step.dom_id}", class: "item",
                input {
                    r#type: "checkbox",
                    id: "{step.dom_id}",
                    checked: step.checked,
                    onchange: move |evt: FormEvent| {
                        on_intent.call(ChecklistIntent::Toggle {
                            id: id.clone(),
                            done: evt.checked(),
                        });
                    },
                }
                label { class: "labels", r#for: "{step.dom_id}",
                    if language.shows_english() {
                        div { class: "en", "{step.en_label}" }
                    }
                    if language.shows_spanish() {
                        div { class: "es", "{step.es_label}" }
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "{card_class}",
            div { class: "section-head",
                div { class: "section-title", "{section.title}" }
                div { class: "progress", id: "prog-{section.key}", "{section.counter}" }
            }
            div { class: "badges",
                button {
                    class: "btn success",
                    r#type: "button",
                    onclick: move |_| {
                        on_intent.call(ChecklistIntent::SetSection {
                            key: mark_key.clone(),
                            done: true,
                        });
                    },
                    "Mark Section"
                }
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| {
                        on_intent.call(ChecklistIntent::SetSection {
                            key: unmark_key.clone(),
                            done: false,
                        });
                    },
                    "Unmark Section"
                }
            }
            details { open: section.open_by_default,
                summary { class: "section-summary", "Steps / Pasos" }
                div { class: "steps", {steps} }
            }
        }
    }
}
