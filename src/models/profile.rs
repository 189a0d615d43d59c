use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Admin,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "employee" => Some(Role::Employee),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// ⇔ profiles row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub updated_at: Option<String>,
}

impl EmployeeProfile {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.trim().is_empty() => {
                format!("{} {}", self.first_name.trim(), last.trim())
            }
            _ => self.first_name.trim().to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
