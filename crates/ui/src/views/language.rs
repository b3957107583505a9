use checklist_core::model::LanguageMode;
use dioxus::prelude::*;

/// Three mutually exclusive display modes; exactly one button is active.
#[component]
pub fn LanguageToggle(mode: LanguageMode, on_select: Callback<LanguageMode>) -> Element {
    let buttons = LanguageMode::ALL.into_iter().map(|option| {
        let class = if option == mode { "btn active" } else { "btn" };
        rsx! {
            button {
                key: "{option.css_class()}",
                class: "{class}",
                r#type: "button",
                aria_pressed: option == mode,
                onclick: move |_| on_select.call(option),
                "{option.label()}"
            }
        }
    });

    rsx! {
        div { class: "lang-toggle", role: "group", {buttons} }
    }
}
