use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval state of a punch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Pendente,
    Aprovado,
    Rejeitado,
}

impl EventStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventStatus::Pendente => "pendente",
            EventStatus::Aprovado => "aprovado",
            EventStatus::Rejeitado => "rejeitado",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pendente" | "pending" => Some(EventStatus::Pendente),
            "aprovado" | "approved" => Some(EventStatus::Aprovado),
            "rejeitado" | "rejected" => Some(EventStatus::Rejeitado),
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, EventStatus::Pendente)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
