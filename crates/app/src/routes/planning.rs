use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdCalendar;
use dioxus_free_icons::Icon;

use crate::components::placeholder::PlaceholderPanel;

const PLANNED_SECTIONS: [&str; 6] = [
    "Planificación de visitas a PNH",
    "Planificación de visitas a Hitos Fronterizos",
    "Planificación de visitas a Sitios de Interés",
    "Planificación de cooperación bilateral",
    "Frecuencias y prioridades",
    "Seguimiento de cumplimiento",
];

/// Annual planning.
#[component]
pub fn Planning() -> Element {
    rsx! {
        div { class: "page",
            div { class: "page-header",
                div {
                    h1 { "Planificación Anual" }
                    p { class: "page-subtitle", "Gestiona la planificación estratégica anual" }
                }
                button { class: "primary", r#type: "button", disabled: true, "Nueva Planificación" }
            }
            PlaceholderPanel {
                title: "Módulo de Planificación Anual",
                intro: "Aquí se implementará la gestión de planificación anual:",
                items: PLANNED_SECTIONS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                icon: rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 56, height: 56 } },
            }
            p { class: "page-note",
                "Recuerda: la planificación es anual y estratégica; la ejecución es diaria y declarativa."
            }
        }
    }
}
