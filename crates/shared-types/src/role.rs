use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission class of an operator. The set is flat: there is no ranking
/// between roles, access is always decided by explicit allow-lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Front-line data entry.
    Digitador,
    /// Operations administration.
    AdminOperaciones,
    /// Unit oversight.
    Comisario,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Digitador, Role::AdminOperaciones, Role::Comisario];

    /// Parse the stored role value. Unknown values yield `None` so that an
    /// unrecognised role is treated the same as a missing profile.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "digitador" => Some(Role::Digitador),
            "admin_operaciones" => Some(Role::AdminOperaciones),
            "comisario" => Some(Role::Comisario),
            _ => None,
        }
    }

    /// Value as stored in the profile table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Digitador => "digitador",
            Role::AdminOperaciones => "admin_operaciones",
            Role::Comisario => "comisario",
        }
    }

    /// Human-readable label for the shell's user summary.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Digitador => "Digitador",
            Role::AdminOperaciones => "Admin Operaciones",
            Role::Comisario => "Comisario",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
