//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Works the front desk, owns shifts
    Operator,
    /// Mechanic, offers a set of services
    Master,
    #[default]
    #[serde(other)]
    Client,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Master => "master",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    /// Service IDs a master performs
    #[serde(default)]
    pub services: Vec<i64>,
    /// Open shift ID, operators only
    #[serde(default)]
    pub current_shift: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_operator(&self) -> bool {
        self.role == UserRole::Operator
    }

    pub fn offers_service(&self, service_id: i64) -> bool {
        self.services.contains(&service_id)
    }
}

/// Create user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    /// Defaults to client
    pub role: Option<UserRole>,
    #[serde(default)]
    pub services: Vec<i64>,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub services: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_reads_as_client() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"A","role":"admin"}"#).unwrap();
        assert_eq!(user.role, UserRole::Client);
        assert!(user.services.is_empty());
        assert_eq!(user.current_shift, None);
    }

    #[test]
    fn test_stored_layout() {
        let user = User {
            id: 3,
            name: "Елена".into(),
            role: UserRole::Operator,
            services: vec![],
            current_shift: Some(42),
            created_at: None,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "operator");
        assert_eq!(value["currentShift"], 42);
    }
}
