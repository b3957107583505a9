use dioxus::prelude::*;

#[component]
pub fn ResetModal(on_cancel: Callback<()>, on_confirm: Callback<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "modal",
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Clear all saved progress?" }
                p { class: "modal-body", "¿Borrar todo el progreso guardado?" }
                div { class: "modal-actions",
                    button {
                        class: "btn modal-cancel",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn danger modal-confirm",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Clear Progress"
                    }
                }
            }
        }
    }
}
