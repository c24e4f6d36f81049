use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdFolder};
use dioxus_free_icons::Icon;

use crate::components::placeholder::PlaceholderPanel;

const REPORT_KINDS: [(&str, &str); 3] = [
    (
        "Reporte Diario",
        "Reporte automático con estado administrativo, labor del día y alertas",
    ),
    ("Reporte Mensual", "Consolidado mensual de operaciones y cumplimiento"),
    ("Reporte Anual (YTD)", "Acumulado año a la fecha con análisis de tendencias"),
];

const PLANNED_FEATURES: [&str; 6] = [
    "Reporte diario automático al Comisario",
    "Dashboard con indicadores clave",
    "Análisis de detenciones por tramo horario",
    "Cumplimiento de planificación anual",
    "Exportación a PDF y Excel",
    "Históricos y tendencias",
];

/// Reports and analysis.
#[component]
pub fn Reports() -> Element {
    rsx! {
        div { class: "page",
            div { class: "page-header",
                div {
                    h1 { "Reportes y Análisis" }
                    p { class: "page-subtitle", "Visualiza y descarga reportes del sistema" }
                }
                button { class: "primary", r#type: "button", disabled: true, "Exportar Datos" }
            }
            div { class: "report-grid",
                for (title, description) in REPORT_KINDS {
                    div { key: "{title}", class: "report-card",
                        Icon::<LdFileText> { icon: LdFileText, width: 24, height: 24 }
                        h3 { "{title}" }
                        p { "{description}" }
                    }
                }
            }
            PlaceholderPanel {
                title: "Sistema de Reportería",
                intro: "El módulo de reportes incluirá:",
                items: PLANNED_FEATURES.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                icon: rsx! { Icon::<LdFolder> { icon: LdFolder, width: 56, height: 56 } },
            }
        }
    }
}
