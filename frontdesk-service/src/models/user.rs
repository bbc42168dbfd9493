//! Staff user model for frontdesk-service.
//!
//! Authentication and session management live outside this service; users
//! exist here so reservation and invoice actions have a staff directory to
//! be attributed against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Receptionist,
    Accountant,
    Manager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Receptionist => "receptionist",
            UserRole::Accountant => "accountant",
            UserRole::Manager => "manager",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            "accountant" => UserRole::Accountant,
            "manager" => UserRole::Manager,
            _ => UserRole::Receptionist,
        }
    }
}

/// Staff account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub phone: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a staff account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub phone: Option<String>,
}
