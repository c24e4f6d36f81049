use crate::format_helpers::{format_long_date, format_timestamp, pluralize};
use crate::query::use_profile;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBell, LdFileText, LdShield, LdUsers};
use dioxus_free_icons::Icon;
use server::api::{get_active_alerts, get_dashboard_stats};
use shared_types::{Alert, AppError, DashboardStats};

const STATS_FAILED: &str = "No se pudieron cargar los indicadores";
const ALERTS_FAILED: &str = "No se pudieron cargar las alertas";

/// Daily operations overview: greeting, today's counters and active alerts.
#[component]
pub fn Dashboard() -> Element {
    let profile = use_profile();
    let stats = use_resource(get_dashboard_stats);
    let alerts = use_resource(get_active_alerts);

    let full_name = profile.profile().map(|p| p.full_name).unwrap_or_default();
    let today = format_long_date(chrono::Local::now().date_naive());

    let stats_view = match &*stats.read() {
        None => rsx! { StatsGrid { stats: None } },
        Some(Ok(s)) => rsx! { StatsGrid { stats: Some(s.clone()) } },
        Some(Err(e)) => {
            let message = AppError::friendly_message_or(&e.to_string(), STATS_FAILED);
            rsx! { div { class: "panel-error", "{message}" } }
        }
    };

    let alerts_view = match &*alerts.read() {
        None => rsx! {
            div { class: "panel-header", h2 { "Alertas Activas" } }
            p { class: "panel-muted", "Cargando alertas..." }
        },
        Some(Ok(list)) => rsx! { AlertList { alerts: list.clone() } },
        Some(Err(e)) => {
            let message = AppError::friendly_message_or(&e.to_string(), ALERTS_FAILED);
            rsx! {
                div { class: "panel-header", h2 { "Alertas Activas" } }
                div { class: "panel-error", "{message}" }
            }
        }
    };

    rsx! {
        div { class: "dashboard-page",
            div { class: "page-header",
                h1 { "Dashboard Operativo" }
                p { class: "page-subtitle", "Bienvenido, {full_name} | {today}" }
            }
            {stats_view}
            section { class: "panel", {alerts_view} }
        }
    }
}

#[component]
fn StatCard(title: String, value: String, icon: Element) -> Element {
    rsx! {
        div { class: "stat-card",
            div { class: "stat-icon", {icon} }
            h3 { class: "stat-value", "{value}" }
            p { class: "stat-title", "{title}" }
        }
    }
}

/// Counter cards. `None` renders placeholders while loading.
#[component]
fn StatsGrid(stats: Option<DashboardStats>) -> Element {
    let value = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_else(|| "…".to_string());
    let registros = value(stats.as_ref().map(|s| s.registros_hoy));
    let detenciones = value(stats.as_ref().map(|s| s.detenciones_hoy));
    let alertas = value(stats.as_ref().map(|s| s.alertas_activas));

    rsx! {
        div { class: "stats-grid",
            StatCard {
                title: "Registros Hoy",
                value: registros,
                icon: rsx! { Icon::<LdFileText> { icon: LdFileText, width: 22, height: 22 } },
            }
            StatCard {
                title: "Detenciones Hoy",
                value: detenciones,
                icon: rsx! { Icon::<LdUsers> { icon: LdUsers, width: 22, height: 22 } },
            }
            StatCard {
                title: "Alertas Activas",
                value: alertas,
                icon: rsx! { Icon::<LdBell> { icon: LdBell, width: 22, height: 22 } },
            }
        }
    }
}

/// One alert prepared for display.
struct AlertRow {
    id: String,
    class: String,
    titulo: String,
    descripcion: Option<String>,
    created: Option<String>,
    prioridad: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id.to_string(),
            class: format!("alert-item {}", alert.priority().css_class()),
            titulo: alert.titulo.clone(),
            descripcion: alert.descripcion.clone(),
            created: alert.created_at.as_ref().map(format_timestamp),
            prioridad: alert.prioridad.clone(),
        }
    }
}

#[component]
pub fn AlertList(alerts: Vec<Alert>) -> Element {
    let count = pluralize(alerts.len(), "alerta", "alertas");
    let rows: Vec<AlertRow> = alerts.iter().map(AlertRow::from).collect();

    rsx! {
        div { class: "panel-header",
            h2 { "Alertas Activas" }
            span { class: "panel-muted", "{count}" }
        }
        if rows.is_empty() {
            div { class: "panel-empty",
                Icon::<LdShield> { icon: LdShield, width: 40, height: 40 }
                p { "No hay alertas activas en este momento" }
            }
        } else {
            ul { class: "alert-list",
                for row in rows {
                    li { key: "{row.id}", class: "{row.class}",
                        div { class: "alert-body",
                            h3 { "{row.titulo}" }
                            if let Some(desc) = row.descripcion {
                                p { "{desc}" }
                            }
                            if let Some(created) = row.created {
                                span { class: "alert-time", "{created}" }
                            }
                        }
                        span { class: "alert-badge", "{row.prioridad}" }
                    }
                }
            }
        }
    }
}
