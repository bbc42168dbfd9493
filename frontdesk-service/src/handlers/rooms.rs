//! Room handlers: inventory CRUD and the manual status switch.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use frontdesk_core::error::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateRoom, ListRoomsFilter, Room, RoomCategory, RoomStatus, UpdateRoom};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct ListRoomsQuery {
    pub status: Option<RoomStatus>,
    pub category: Option<RoomCategory>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 10, message = "Room number must be 1-10 characters"))]
    pub number: String,
    pub category: RoomCategory,
    pub price_per_night: Decimal,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomRequest {
    pub category: Option<RoomCategory>,
    pub price_per_night: Option<Decimal>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SetRoomStatusRequest {
    pub status: RoomStatus,
}

pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<Vec<Room>>, AppError> {
    let filter = ListRoomsFilter {
        status: query.status,
        category: query.category,
    };
    let rooms = state.db.list_rooms(&filter).await?;
    Ok(Json(rooms))
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    payload.validate()?;

    let input = CreateRoom {
        number: payload.number,
        category: payload.category,
        price_per_night: payload.price_per_night,
        capacity: payload.capacity,
    };
    let room = state.db.create_room(&input).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<Room>, AppError> {
    let room = state
        .db
        .get_room(room_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Room not found")))?;
    Ok(Json(room))
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<Json<Room>, AppError> {
    let input = UpdateRoom {
        category: payload.category,
        price_per_night: payload.price_per_night,
        capacity: payload.capacity,
    };
    let room = state
        .db
        .update_room(room_id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Room not found")))?;
    Ok(Json(room))
}

/// Manual status override. Setting `maintenance` suspends automatic
/// occupancy derivation for the room until staff set another status.
pub async fn set_room_status(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<SetRoomStatusRequest>,
) -> Result<Json<Room>, AppError> {
    let room = state
        .db
        .set_room_status(room_id, payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Room not found")))?;
    Ok(Json(room))
}
