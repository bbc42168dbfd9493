//! Staff directory handlers. Authentication lives outside this service.

use axum::{extract::State, http::StatusCode, Json};
use frontdesk_core::error::AppError;
use serde::Deserialize;
use validator::Validate;

use crate::models::{CreateUser, User, UserRole};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: String,
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: UserRole,
    pub phone: Option<String>,
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.db.list_users().await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.validate()?;

    let input = CreateUser {
        username: payload.username,
        full_name: payload.full_name,
        email: payload.email,
        role: payload.role,
        phone: payload.phone,
    };
    let user = state.db.create_user(&input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
