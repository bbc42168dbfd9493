//! Room model and occupancy state machine for frontdesk-service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    Simple,
    Double,
    Suite,
}

impl RoomCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Simple => "simple",
            RoomCategory::Double => "double",
            RoomCategory::Suite => "suite",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "double" => RoomCategory::Double,
            "suite" => RoomCategory::Suite,
            _ => RoomCategory::Simple,
        }
    }
}

/// Room occupancy status.
///
/// `Maintenance` is a manual override: while set, the occupancy synchronizer
/// leaves the room alone. The other three values are derived from reservation
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Free,
    Occupied,
    Reserved,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Free => "free",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Reserved => "reserved",
            RoomStatus::Maintenance => "maintenance",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "occupied" => RoomStatus::Occupied,
            "reserved" => RoomStatus::Reserved,
            "maintenance" => RoomStatus::Maintenance,
            _ => RoomStatus::Free,
        }
    }
}

/// Hotel room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub room_id: Uuid,
    pub number: String,
    pub category: String,
    pub price_per_night: Decimal,
    pub capacity: i32,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

/// Filter parameters for listing rooms.
#[derive(Debug, Clone, Default)]
pub struct ListRoomsFilter {
    pub status: Option<RoomStatus>,
    pub category: Option<RoomCategory>,
}

/// Input for creating a room.
#[derive(Debug, Clone)]
pub struct CreateRoom {
    pub number: String,
    pub category: RoomCategory,
    pub price_per_night: Decimal,
    pub capacity: i32,
}

/// Input for updating a room.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoom {
    pub category: Option<RoomCategory>,
    pub price_per_night: Option<Decimal>,
    pub capacity: Option<i32>,
}

/// Decide the occupancy transition for a room after a reservation write.
///
/// `active_today` is whether a confirmed reservation covers today. Returns
/// the status to store, or `None` when the room should be left unchanged.
/// A room in `Maintenance` never auto-transitions; `Reserved` is only ever a
/// manual value, the synchronizer assigns nothing but `Occupied` and `Free`.
pub fn occupancy_transition(current: RoomStatus, active_today: bool) -> Option<RoomStatus> {
    match current {
        RoomStatus::Maintenance => None,
        RoomStatus::Occupied => {
            if active_today {
                None
            } else {
                Some(RoomStatus::Free)
            }
        }
        RoomStatus::Free | RoomStatus::Reserved => {
            if active_today {
                Some(RoomStatus::Occupied)
            } else {
                None
            }
        }
    }
}
