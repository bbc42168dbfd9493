//! Reservation handlers.
//!
//! Writes go through `BookingService`; a rejected booking surfaces as a
//! 400 (invalid range) or 409 (overlap) without naming the conflicting
//! reservation.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use frontdesk_core::error::AppError;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    CreateReservation, ListReservationsFilter, Reservation, ReservationStatus, UpdateReservation,
};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct ListReservationsQuery {
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub client_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReservationRequest {
    pub client_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct SetReservationStatusRequest {
    pub status: ReservationStatus,
}

/// Current and upcoming reservations (check-out today or later).
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let filter = ListReservationsFilter {
        status: query.status,
    };
    let today = Utc::now().date_naive();
    let reservations = state.db.list_reservations(&filter, today).await?;
    Ok(Json(reservations))
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let input = CreateReservation {
        client_id: payload.client_id,
        room_id: payload.room_id,
        check_in: payload.check_in,
        check_out: payload.check_out,
        status: payload.status.unwrap_or(ReservationStatus::Pending),
    };
    let reservation = state.booking.create_reservation(&input).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .db
        .get_reservation(reservation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Reservation not found")))?;
    Ok(Json(reservation))
}

pub async fn update_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, AppError> {
    let input = UpdateReservation {
        client_id: payload.client_id,
        room_id: payload.room_id,
        check_in: payload.check_in,
        check_out: payload.check_out,
        status: payload.status,
    };
    let reservation = state
        .booking
        .update_reservation(reservation_id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Reservation not found")))?;
    Ok(Json(reservation))
}

/// Quick status change from the reservations list.
pub async fn set_reservation_status(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    Json(payload): Json<SetReservationStatusRequest>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .booking
        .set_reservation_status(reservation_id, payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Reservation not found")))?;
    Ok(Json(reservation))
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = state.booking.delete_reservation(reservation_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Reservation not found")))
    }
}
