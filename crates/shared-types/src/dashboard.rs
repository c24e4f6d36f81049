use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of an operational alert, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPriority {
    Critica,
    Alta,
    Media,
    Baja,
}

impl AlertPriority {
    /// Unrecognised values are shown with the lowest severity.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "critica" | "crítica" => AlertPriority::Critica,
            "alta" => AlertPriority::Alta,
            "media" => AlertPriority::Media,
            _ => AlertPriority::Baja,
        }
    }

    /// CSS modifier used by the alert list.
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertPriority::Critica => "alert-critical",
            AlertPriority::Alta => "alert-high",
            AlertPriority::Media => "alert-medium",
            AlertPriority::Baja => "alert-low",
        }
    }
}

/// Row of the `alertas` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub prioridad: String,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn priority(&self) -> AlertPriority {
        AlertPriority::parse(&self.prioridad)
    }
}

/// Daily activity counters shown on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// `YYYY-MM-DD` the counts refer to.
    pub fecha: String,
    pub registros_hoy: u64,
    pub detenciones_hoy: u64,
    pub alertas_activas: u64,
}
