use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMPLOYEE" => Ok(Role::Employee),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

/// Who is signed in. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub employee_id: i32,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub pin: String,
    pub role: Role,
    pub branch_id: i32,
    pub is_active: bool,
}

impl Employee {
    pub fn identity(&self) -> Identity {
        Identity {
            employee_id: self.id,
            name: self.name.clone(),
            role: self.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub pin: String,
    pub role: Role,
    pub branch_id: i32,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("name must not be blank".into()));
        }
        if self.pin.trim().is_empty() {
            return Err(DomainError::InvalidInput("pin must not be blank".into()));
        }
        Ok(())
    }
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub price: i32,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub price: i32,
}

impl NewService {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("name must not be blank".into()));
        }
        if self.price < 0 {
            return Err(DomainError::InvalidInput("price must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Shift {
    pub id: i32,
    pub employee_id: i32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}
