pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod planning;
pub mod registry;
pub mod reports;

use crate::identity::use_identity;
use crate::query::use_profile;
use crate::role_gate::RoleGate;
use crate::session::use_session;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdCalendar, LdEllipsis, LdFileText, LdFolder, LdLayoutDashboard, LdLock,
};
use dioxus_free_icons::Icon;
use shared_types::{guard, mark_active, navigation_entries, visible_entries, AppPath, GuardDecision, NavIcon, NavItem};

use dashboard::Dashboard;
use login::Login;
use not_found::NotFound;
use planning::Planning;
use registry::Registry;
use reports::Reports;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SessionGuard)]
        #[route("/login")]
        Login {},
        #[layout(Shell)]
            #[route("/")]
            Dashboard {},
            #[route("/registro")]
            Registry {},
            #[route("/planificacion")]
            Planning {},
            #[route("/reportes")]
            Reports {},
        #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Entry of the routing table this route renders, if any.
    pub fn app_path(&self) -> Option<AppPath> {
        match self {
            Route::Login {} => Some(AppPath::Login),
            Route::Dashboard {} => Some(AppPath::Dashboard),
            Route::Registry {} => Some(AppPath::Registro),
            Route::Planning {} => Some(AppPath::Planificacion),
            Route::Reports {} => Some(AppPath::Reportes),
            Route::NotFound { .. } => None,
        }
    }
}

impl From<AppPath> for Route {
    fn from(path: AppPath) -> Self {
        match path {
            AppPath::Login => Route::Login {},
            AppPath::Dashboard => Route::Dashboard {},
            AppPath::Registro => Route::Registry {},
            AppPath::Planificacion => Route::Planning {},
            AppPath::Reportes => Route::Reports {},
        }
    }
}

#[component]
fn LoadingScreen(message: String) -> Element {
    rsx! {
        div { class: "auth-guard-loading",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}

/// Route guard: recomputed from the session snapshot on every render.
#[component]
fn SessionGuard() -> Element {
    let session = use_session();
    let route: Route = use_route();

    let Some(path) = route.app_path() else {
        return rsx! { Outlet::<Route> {} };
    };

    let decision = guard::evaluate(&session.snapshot.read(), path);
    match decision {
        GuardDecision::Loading => rsx! {
            LoadingScreen { message: "Cargando..." }
        },
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
        GuardDecision::Redirect(target) => {
            navigator().replace(Route::from(target));
            rsx! {
                LoadingScreen { message: "Redirigiendo..." }
            }
        }
    }
}

fn nav_icon(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Dashboard => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        NavIcon::Registry => rsx! { Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 } },
        NavIcon::Planning => rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 18, height: 18 } },
        NavIcon::Reports => rsx! { Icon::<LdFolder> { icon: LdFolder, width: 18, height: 18 } },
    }
}

/// Sidebar links for the entries visible to the current role.
#[component]
fn NavList(items: Vec<NavItem>, on_navigate: EventHandler<()>) -> Element {
    rsx! {
        nav { class: "sidebar-nav",
            for item in items {
                if let Some(path) = AppPath::from_path(item.entry.href) {
                    Link {
                        key: "{item.entry.href}",
                        to: Route::from(path),
                        class: if item.active { "nav-item active" } else { "nav-item" },
                        onclick: move |_| on_navigate.call(()),
                        {nav_icon(item.entry.icon)}
                        span { "{item.entry.label}" }
                    }
                }
            }
        }
    }
}

/// Name, role label and organizational unit of the signed-in user.
/// Blank while the profile is loading.
#[component]
pub fn UserSummary(full_name: String, role_label: String, unit: Option<String>) -> Element {
    rsx! {
        div { class: "user-summary",
            p { class: "user-name", "{full_name}" }
            p { class: "user-role", "{role_label}" }
            if let Some(unit) = unit {
                p { class: "user-unit", "{unit}" }
            }
        }
    }
}

/// Persistent chrome around every authenticated screen.
#[component]
fn Shell() -> Element {
    let route: Route = use_route();
    let profile = use_profile();
    let identity = use_identity();
    let toast = dioxus_primitives::toast::use_toast();
    let mut sidebar_open = use_signal(|| false);

    let current = profile.profile();
    let role = current.as_ref().and_then(|p| p.role);
    let current_path = route.to_string();
    let items = mark_active(&current_path, &visible_entries(role, &navigation_entries()));

    let full_name = current.as_ref().map(|p| p.full_name.clone()).unwrap_or_default();
    let role_label = role.map(|r| r.label().to_string()).unwrap_or_default();
    let unit = current
        .as_ref()
        .and_then(|p| p.cuartel.as_ref())
        .map(|c| c.nombre.clone());

    let handle_sign_out = move |_| {
        let identity = identity.clone();
        async move {
            if let Err(e) = identity.sign_out().await {
                crate::notify::failure(toast, &e, crate::notify::SIGN_OUT_FAILED);
            }
            navigator().replace(Route::Login {});
        }
    };

    rsx! {
        div { class: "app-shell",
            if sidebar_open() {
                div {
                    class: "sidebar-backdrop",
                    onclick: move |_| sidebar_open.set(false),
                }
            }

            aside { class: if sidebar_open() { "sidebar open" } else { "sidebar" },
                div { class: "sidebar-brand",
                    div { class: "sidebar-brand-mark", "S" }
                    div {
                        span { class: "sidebar-brand-name", "SICOF" }
                        span { class: "sidebar-brand-sub", "Núcleo" }
                    }
                }

                NavList { items, on_navigate: move |_| sidebar_open.set(false) }

                div { class: "sidebar-footer",
                    UserSummary { full_name, role_label, unit }
                    button {
                        class: "sign-out",
                        r#type: "button",
                        onclick: handle_sign_out,
                        Icon::<LdLock> { icon: LdLock, width: 16, height: 16 }
                        "Cerrar Sesión"
                    }
                }
            }

            div { class: "shell-main",
                header { class: "shell-header",
                    button {
                        class: "sidebar-toggle",
                        r#type: "button",
                        aria_label: "Abrir menú",
                        onclick: move |_| sidebar_open.set(!sidebar_open()),
                        Icon::<LdEllipsis> { icon: LdEllipsis, width: 20, height: 20 }
                    }
                }

                main { class: "page-content",
                    if let Some(path) = route.app_path() {
                        RoleGate { path, Outlet::<Route> {} }
                    } else {
                        Outlet::<Route> {}
                    }
                }
            }
        }
    }
}
