use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of punch recorded by an employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Entrada,
    Saida,
    SaidaAlmoco,
    VoltaAlmoco,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Entrada,
        EventKind::SaidaAlmoco,
        EventKind::VoltaAlmoco,
        EventKind::Saida,
    ];

    /// Parse user input. Accepts the storage names, the accented `saída`
    /// and a few English aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "entrada" | "in" => Some(Self::Entrada),
            "saida" | "saída" | "out" => Some(Self::Saida),
            "saida_almoco" | "saida-almoco" | "lunch-out" => Some(Self::SaidaAlmoco),
            "volta_almoco" | "volta-almoco" | "lunch-in" => Some(Self::VoltaAlmoco),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Entrada => "entrada",
            EventKind::Saida => "saida",
            EventKind::SaidaAlmoco => "saida_almoco",
            EventKind::VoltaAlmoco => "volta_almoco",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(EventKind::Entrada),
            "saida" | "saída" => Some(EventKind::Saida),
            "saida_almoco" => Some(EventKind::SaidaAlmoco),
            "volta_almoco" => Some(EventKind::VoltaAlmoco),
            _ => None,
        }
    }

    /// Human label used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Entrada => "Entrada",
            EventKind::Saida => "Saída",
            EventKind::SaidaAlmoco => "Saída Almoço",
            EventKind::VoltaAlmoco => "Volta Almoço",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
