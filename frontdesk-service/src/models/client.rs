//! Client model for frontdesk-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Hotel guest on file at the front desk.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub client_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub id_document: String,
    pub created_utc: DateTime<Utc>,
}

/// Input for registering a client.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub id_document: String,
}

/// Input for editing a client's contact details.
#[derive(Debug, Clone, Default)]
pub struct UpdateClient {
    pub email: Option<String>,
    pub phone: Option<String>,
}
