use crate::query::use_profile;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdShield;
use dioxus_free_icons::Icon;
use shared_types::{screen_access, AppPath, ScreenAccess};

/// Check the resolved role against the allow-list of `path`.
pub fn use_screen_access(path: AppPath) -> ScreenAccess {
    let profile = use_profile();
    screen_access(profile.role(), profile.is_settled(), path)
}

/// Render children only when the current role may see `path`.
/// While the profile is loading a placeholder is shown instead.
#[component]
pub fn RoleGate(path: AppPath, children: Element) -> Element {
    match use_screen_access(path) {
        ScreenAccess::Granted => rsx! { {children} },
        ScreenAccess::Pending => rsx! {
            div { class: "screen-pending",
                p { "Cargando perfil..." }
            }
        },
        ScreenAccess::Denied => rsx! { AccessDenied {} },
    }
}

#[component]
pub fn AccessDenied() -> Element {
    rsx! {
        div { class: "access-denied",
            Icon::<LdShield> { icon: LdShield, width: 48, height: 48 }
            h2 { "Acceso restringido" }
            p { "Tu rol no tiene permiso para ver esta sección." }
        }
    }
}
