//! Authorization matrix shared by the route guard, the navigation filter
//! and the screen role gate.
//!
//! Every reachable screen is declared once in [`ROUTE_TABLE`] together with
//! the roles allowed to see it. Navigation entries are derived from the same
//! rows, so the sidebar and the role gate cannot disagree.

use crate::Role;
use serde::{Deserialize, Serialize};

/// Fixed routing surface of the application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppPath {
    Login,
    Dashboard,
    Registro,
    Planificacion,
    Reportes,
}

impl AppPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppPath::Login => "/login",
            AppPath::Dashboard => "/",
            AppPath::Registro => "/registro",
            AppPath::Planificacion => "/planificacion",
            AppPath::Reportes => "/reportes",
        }
    }

    /// Exact lookup; `/plan` does not resolve to `/planificacion`.
    pub fn from_path(path: &str) -> Option<Self> {
        ROUTE_TABLE
            .iter()
            .map(|d| d.path)
            .find(|p| p.as_str() == path)
    }

    pub fn descriptor(&self) -> &'static RouteDescriptor {
        // Every variant has exactly one row; see `every_path_has_one_descriptor`.
        ROUTE_TABLE
            .iter()
            .find(|d| d.path == *self)
            .unwrap_or(&ROUTE_TABLE[0])
    }
}

/// Session requirement of a route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Access {
    /// Only reachable without a session (the login screen).
    Anonymous,
    /// Requires a session; rendered inside the shell.
    Authenticated,
}

/// Icon shown next to a navigation entry. Mapped to a concrete icon by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Registry,
    Planning,
    Reports,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavMeta {
    pub label: &'static str,
    pub icon: NavIcon,
}

/// One row of the routing table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteDescriptor {
    pub path: AppPath,
    pub access: Access,
    /// Roles allowed to see the screen. Ignored for anonymous routes.
    pub roles: &'static [Role],
    /// Present when the route appears in the sidebar.
    pub nav: Option<NavMeta>,
}

pub const ROUTE_TABLE: &[RouteDescriptor] = &[
    RouteDescriptor {
        path: AppPath::Login,
        access: Access::Anonymous,
        roles: &[],
        nav: None,
    },
    RouteDescriptor {
        path: AppPath::Dashboard,
        access: Access::Authenticated,
        roles: &[Role::Digitador, Role::AdminOperaciones, Role::Comisario],
        nav: Some(NavMeta {
            label: "Dashboard",
            icon: NavIcon::Dashboard,
        }),
    },
    RouteDescriptor {
        path: AppPath::Registro,
        access: Access::Authenticated,
        roles: &[Role::Digitador, Role::AdminOperaciones],
        nav: Some(NavMeta {
            label: "Registro Diario",
            icon: NavIcon::Registry,
        }),
    },
    RouteDescriptor {
        path: AppPath::Planificacion,
        access: Access::Authenticated,
        roles: &[Role::AdminOperaciones],
        nav: Some(NavMeta {
            label: "Planificación",
            icon: NavIcon::Planning,
        }),
    },
    RouteDescriptor {
        path: AppPath::Reportes,
        access: Access::Authenticated,
        roles: &[Role::AdminOperaciones, Role::Comisario],
        nav: Some(NavMeta {
            label: "Reportes",
            icon: NavIcon::Reports,
        }),
    },
];

/// Sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationEntry {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: NavIcon,
    pub roles: &'static [Role],
}

impl NavigationEntry {
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Navigation entries in declared order.
pub fn navigation_entries() -> Vec<NavigationEntry> {
    ROUTE_TABLE
        .iter()
        .filter_map(|d| {
            d.nav.map(|meta| NavigationEntry {
                label: meta.label,
                href: d.path.as_str(),
                icon: meta.icon,
                roles: d.roles,
            })
        })
        .collect()
}

/// Entries visible to `role`, in input order. No role means no entries.
pub fn visible_entries(role: Option<Role>, entries: &[NavigationEntry]) -> Vec<NavigationEntry> {
    let Some(role) = role else {
        return Vec::new();
    };
    entries.iter().filter(|e| e.allows(role)).copied().collect()
}

/// Entry paired with its highlight state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavItem {
    pub entry: NavigationEntry,
    pub active: bool,
}

/// Mark the entry whose `href` equals `current_path` exactly.
pub fn mark_active(current_path: &str, entries: &[NavigationEntry]) -> Vec<NavItem> {
    entries
        .iter()
        .map(|e| NavItem {
            entry: *e,
            active: e.href == current_path,
        })
        .collect()
}

/// Outcome of checking the resolved role against a screen's allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAccess {
    Granted,
    /// Profile still loading.
    Pending,
    Denied,
}

/// Decide whether the screen at `path` may be shown.
///
/// `profile_settled` is false while the profile lookup is in flight. Once it
/// has settled, a missing role (no row, unknown role, or failed lookup) is
/// denied.
pub fn screen_access(role: Option<Role>, profile_settled: bool, path: AppPath) -> ScreenAccess {
    let descriptor = path.descriptor();
    if descriptor.access == Access::Anonymous {
        return ScreenAccess::Granted;
    }
    match role {
        Some(r) if descriptor.roles.contains(&r) => ScreenAccess::Granted,
        Some(_) => ScreenAccess::Denied,
        None if profile_settled => ScreenAccess::Denied,
        None => ScreenAccess::Pending,
    }
}
