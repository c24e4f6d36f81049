use dioxus::prelude::*;

use crate::routes::Route;

/// Fallback for paths outside the routing table.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { "Página no encontrada" }
                p {
                    "La ruta "
                    code { "{path}" }
                    " no existe."
                }
                Link { to: Route::Dashboard {}, class: "not-found-link", "Volver al Dashboard" }
            }
        }
    }
}
