use dioxus::prelude::*;

/// Centered notice for a module that is still being built.
#[component]
pub fn PlaceholderPanel(title: String, intro: String, items: Vec<String>, icon: Element) -> Element {
    rsx! {
        section { class: "panel placeholder",
            div { class: "placeholder-icon", {icon} }
            h2 { "{title}" }
            p { class: "panel-muted", "{intro}" }
            ul { class: "checklist",
                for item in items {
                    li { key: "{item}", "✓ {item}" }
                }
            }
        }
    }
}
