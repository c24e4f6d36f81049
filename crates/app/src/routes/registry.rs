use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdFileText;
use dioxus_free_icons::Icon;

use crate::components::placeholder::PlaceholderPanel;

const PLANNED_SECTIONS: [&str; 6] = [
    "Identificación diaria",
    "Demanda ciudadana",
    "Demanda preventiva fronteriza",
    "Cooperación e integración",
    "Operaciones internas",
    "Registro de detenciones por tramo horario",
];

/// Daily registry. The entry form itself is not built yet.
#[component]
pub fn Registry() -> Element {
    rsx! {
        div { class: "page",
            div { class: "page-header",
                div {
                    h1 { "Registro Diario" }
                    p { class: "page-subtitle", "Registra la labor operativa del día" }
                }
                button { class: "primary", r#type: "button", disabled: true, "Nuevo Registro" }
            }
            PlaceholderPanel {
                title: "Formulario de Registro Diario",
                intro: "Aquí se implementará el formulario completo de registro con todos los módulos:",
                items: PLANNED_SECTIONS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                icon: rsx! { Icon::<LdFileText> { icon: LdFileText, width: 56, height: 56 } },
            }
        }
    }
}
