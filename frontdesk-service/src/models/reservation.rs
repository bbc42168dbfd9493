//! Reservation model and booking validation for frontdesk-service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Reservation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "confirmed" => ReservationStatus::Confirmed,
            "cancelled" => ReservationStatus::Cancelled,
            "completed" => ReservationStatus::Completed,
            _ => ReservationStatus::Pending,
        }
    }
}

/// Room reservation over a half-open date interval `[check_in, check_out)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub reservation_id: Uuid,
    pub client_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

/// Filter parameters for listing reservations.
#[derive(Debug, Clone, Default)]
pub struct ListReservationsFilter {
    pub status: Option<ReservationStatus>,
}

/// Input for creating a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub client_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
}

/// Input for updating a reservation.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservation {
    pub client_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
}

/// Booking rejected by validation. User-correctable; the caller must submit
/// different dates, not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Check-out date must be after check-in date")]
    InvalidRange,
    #[error("This room is already reserved for all or part of this period")]
    Overlap,
}

/// A booking request to validate against the room's existing reservations.
#[derive(Debug, Clone)]
pub struct BookingCandidate {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Set when updating, so the reservation does not conflict with itself.
    pub excluding: Option<Uuid>,
}

/// Validate a booking candidate against existing reservations.
///
/// Pure and deterministic. Rejects `check_in >= check_out` up front, then
/// looks for any non-cancelled reservation on the same room whose half-open
/// interval intersects the candidate's. Back-to-back stays (one check-out on
/// the other's check-in) do not intersect and are accepted. Runs on every
/// create and every update, including status-only updates.
pub fn validate_booking(
    candidate: &BookingCandidate,
    existing: &[Reservation],
) -> Result<(), BookingError> {
    if candidate.check_in >= candidate.check_out {
        return Err(BookingError::InvalidRange);
    }

    let conflicting = existing.iter().any(|r| {
        r.room_id == candidate.room_id
            && ReservationStatus::from_string(&r.status) != ReservationStatus::Cancelled
            && Some(r.reservation_id) != candidate.excluding
            && r.check_in < candidate.check_out
            && r.check_out > candidate.check_in
    });

    if conflicting {
        return Err(BookingError::Overlap);
    }

    Ok(())
}
