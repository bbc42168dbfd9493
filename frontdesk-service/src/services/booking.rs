//! Reservation lifecycle for frontdesk-service.
//!
//! Every reservation write runs as one Postgres transaction: lock the room
//! row, validate the dates against the room's other reservations, persist,
//! then the two derived-state reactions in a fixed order: invoice
//! get-or-create (inserts only) and room occupancy resync. The `FOR UPDATE`
//! room lock is held across the overlap check and the insert, so two
//! concurrent bookings for the same room serialize instead of both passing
//! the check. A validation failure aborts before anything is written.

use crate::models::{
    occupancy_transition, stay_total, validate_booking, BookingCandidate, BookingError,
    CreateReservation, Reservation, ReservationStatus, Room, RoomStatus, UpdateReservation,
};
use crate::services::database::Database;
use crate::services::metrics::{BOOKING_REJECTIONS_TOTAL, DB_QUERY_DURATION, RESERVATIONS_TOTAL};
use chrono::{NaiveDate, Utc};
use frontdesk_core::error::AppError;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use tracing::{info, instrument};
use uuid::Uuid;

const ROOM_COLUMNS: &str = "room_id, number, category, price_per_night, capacity, status, created_utc";
const RESERVATION_COLUMNS: &str =
    "reservation_id, client_id, room_id, check_in, check_out, status, created_utc";

/// Orchestrates reservation writes and their derived effects.
#[derive(Clone)]
pub struct BookingService {
    db: Database,
}

impl BookingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a reservation, its invoice, and resync the room's status.
    #[instrument(skip(self, input), fields(room_id = %input.room_id, client_id = %input.client_id))]
    pub async fn create_reservation(
        &self,
        input: &CreateReservation,
    ) -> Result<Reservation, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_reservation"])
            .start_timer();
        let today = Utc::now().date_naive();

        let mut tx = self.db.pool().begin().await.map_err(tx_err)?;

        let room = lock_room(&mut tx, input.room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Room not found")))?;

        let client_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clients WHERE client_id = $1)")
                .bind(input.client_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(tx_err)?;
        if !client_exists {
            return Err(AppError::NotFound(anyhow::anyhow!("Client not found")));
        }

        let existing = reservations_for_room(&mut tx, input.room_id).await?;
        let candidate = BookingCandidate {
            room_id: input.room_id,
            check_in: input.check_in,
            check_out: input.check_out,
            excluding: None,
        };
        validate_booking(&candidate, &existing).map_err(rejection)?;

        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            INSERT INTO reservations (reservation_id, client_id, room_id, check_in, check_out, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RESERVATION_COLUMNS}
            "#,
        ))
        .bind(Uuid::new_v4())
        .bind(input.client_id)
        .bind(input.room_id)
        .bind(input.check_in)
        .bind(input.check_out)
        .bind(input.status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(tx_err)?;

        ensure_invoice(&mut tx, &reservation, room.price_per_night).await?;
        resync_room_status(&mut tx, input.room_id, today).await?;

        tx.commit().await.map_err(tx_err)?;
        timer.observe_duration();

        RESERVATIONS_TOTAL
            .with_label_values(&[input.status.as_str()])
            .inc();
        info!(
            reservation_id = %reservation.reservation_id,
            check_in = %reservation.check_in,
            check_out = %reservation.check_out,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Update a reservation. Re-validates unconditionally, even when only the
    /// status changes, then resyncs the room. The invoice is not recomputed:
    /// its amount is frozen at first computation.
    #[instrument(skip(self, input), fields(reservation_id = %reservation_id))]
    pub async fn update_reservation(
        &self,
        reservation_id: Uuid,
        input: &UpdateReservation,
    ) -> Result<Option<Reservation>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_reservation"])
            .start_timer();
        let today = Utc::now().date_naive();

        let mut tx = self.db.pool().begin().await.map_err(tx_err)?;

        let current = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(tx_err)?;
        let current = match current {
            Some(r) => r,
            None => return Ok(None),
        };

        let room_id = input.room_id.unwrap_or(current.room_id);
        if room_id == current.room_id {
            lock_room(&mut tx, room_id)
                .await?
                .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Room not found")))?;
        } else {
            // Room move: take both row locks in id order, so opposing moves
            // between the same pair of rooms serialize instead of deadlocking
            let (first, second) = if current.room_id < room_id {
                (current.room_id, room_id)
            } else {
                (room_id, current.room_id)
            };
            let first_room = lock_room(&mut tx, first).await?;
            let second_room = lock_room(&mut tx, second).await?;
            let target = if first == room_id { first_room } else { second_room };
            target.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Room not found")))?;
        }

        let client_id = input.client_id.unwrap_or(current.client_id);
        if client_id != current.client_id {
            let client_exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clients WHERE client_id = $1)")
                    .bind(client_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(tx_err)?;
            if !client_exists {
                return Err(AppError::NotFound(anyhow::anyhow!("Client not found")));
            }
        }

        let check_in = input.check_in.unwrap_or(current.check_in);
        let check_out = input.check_out.unwrap_or(current.check_out);
        let status = input
            .status
            .unwrap_or_else(|| ReservationStatus::from_string(&current.status));

        let existing = reservations_for_room(&mut tx, room_id).await?;
        let candidate = BookingCandidate {
            room_id,
            check_in,
            check_out,
            excluding: Some(reservation_id),
        };
        validate_booking(&candidate, &existing).map_err(rejection)?;

        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            UPDATE reservations
            SET client_id = $2, room_id = $3, check_in = $4, check_out = $5, status = $6
            WHERE reservation_id = $1
            RETURNING {RESERVATION_COLUMNS}
            "#,
        ))
        .bind(reservation_id)
        .bind(client_id)
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .bind(status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(tx_err)?;

        resync_room_status(&mut tx, room_id, today).await?;
        if current.room_id != room_id {
            // The vacated room (already locked above) may drop back to free
            resync_room_status(&mut tx, current.room_id, today).await?;
        }

        tx.commit().await.map_err(tx_err)?;
        timer.observe_duration();

        RESERVATIONS_TOTAL.with_label_values(&[status.as_str()]).inc();
        info!(
            reservation_id = %reservation.reservation_id,
            status = %reservation.status,
            "Reservation updated"
        );

        Ok(Some(reservation))
    }

    /// Quick status change. A full re-validating update under the hood.
    pub async fn set_reservation_status(
        &self,
        reservation_id: Uuid,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, AppError> {
        let input = UpdateReservation {
            status: Some(status),
            ..Default::default()
        };
        self.update_reservation(reservation_id, &input).await
    }

    /// Delete a reservation and resync its room. The invoice cascades away
    /// with the reservation.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn delete_reservation(&self, reservation_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_reservation"])
            .start_timer();
        let today = Utc::now().date_naive();

        let mut tx = self.db.pool().begin().await.map_err(tx_err)?;

        let current = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(tx_err)?;
        let current = match current {
            Some(r) => r,
            None => return Ok(false),
        };

        lock_room(&mut tx, current.room_id).await?;

        sqlx::query("DELETE FROM reservations WHERE reservation_id = $1")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await
            .map_err(tx_err)?;

        resync_room_status(&mut tx, current.room_id, today).await?;

        tx.commit().await.map_err(tx_err)?;
        timer.observe_duration();

        info!(reservation_id = %reservation_id, "Reservation deleted");

        Ok(true)
    }
}

fn tx_err(e: sqlx::Error) -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("Reservation transaction failed: {}", e))
}

fn rejection(e: BookingError) -> AppError {
    let reason = match e {
        BookingError::InvalidRange => "invalid_range",
        BookingError::Overlap => "overlap",
    };
    BOOKING_REJECTIONS_TOTAL.with_label_values(&[reason]).inc();

    match e {
        BookingError::InvalidRange => AppError::BadRequest(anyhow::anyhow!(e)),
        BookingError::Overlap => AppError::Conflict(anyhow::anyhow!(e)),
    }
}

/// Lock a room row for the rest of the transaction. Serializes all booking
/// writes for one room, closing the overlap check-then-insert race.
async fn lock_room(conn: &mut PgConnection, room_id: Uuid) -> Result<Option<Room>, AppError> {
    sqlx::query_as::<_, Room>(&format!(
        "SELECT {ROOM_COLUMNS} FROM rooms WHERE room_id = $1 FOR UPDATE"
    ))
    .bind(room_id)
    .fetch_optional(conn)
    .await
    .map_err(tx_err)
}

/// All reservations for a room, for the validator to filter.
async fn reservations_for_room(
    conn: &mut PgConnection,
    room_id: Uuid,
) -> Result<Vec<Reservation>, AppError> {
    sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE room_id = $1"
    ))
    .bind(room_id)
    .fetch_all(conn)
    .await
    .map_err(tx_err)
}

/// Get-or-create the reservation's invoice and fill its amount while null.
///
/// The insert is idempotent (`ON CONFLICT DO NOTHING` on the one-to-one
/// reservation key), and the amount is only computed when absent, never
/// recomputed.
async fn ensure_invoice(
    conn: &mut PgConnection,
    reservation: &Reservation,
    price_per_night: Decimal,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO invoices (invoice_id, reservation_id)
        VALUES ($1, $2)
        ON CONFLICT (reservation_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(reservation.reservation_id)
    .execute(&mut *conn)
    .await
    .map_err(tx_err)?;

    let total = stay_total(reservation.check_in, reservation.check_out, price_per_night);
    sqlx::query(
        "UPDATE invoices SET total_amount = $2 WHERE reservation_id = $1 AND total_amount IS NULL",
    )
    .bind(reservation.reservation_id)
    .bind(total)
    .execute(&mut *conn)
    .await
    .map_err(tx_err)?;

    Ok(())
}

/// Recompute a room's occupancy from fresh reservation state.
///
/// Reads inside the same transaction as the reservation write, so the
/// decision never sees a stale view.
async fn resync_room_status(
    conn: &mut PgConnection,
    room_id: Uuid,
    today: NaiveDate,
) -> Result<(), AppError> {
    let status: String = sqlx::query_scalar("SELECT status FROM rooms WHERE room_id = $1")
        .bind(room_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(tx_err)?;

    let active_today: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM reservations
            WHERE room_id = $1
              AND status = 'confirmed'
              AND check_in <= $2
              AND check_out > $2
        )
        "#,
    )
    .bind(room_id)
    .bind(today)
    .fetch_one(&mut *conn)
    .await
    .map_err(tx_err)?;

    if let Some(next) = occupancy_transition(RoomStatus::from_string(&status), active_today) {
        sqlx::query("UPDATE rooms SET status = $2 WHERE room_id = $1")
            .bind(room_id)
            .bind(next.as_str())
            .execute(&mut *conn)
            .await
            .map_err(tx_err)?;

        info!(room_id = %room_id, from = %status, to = next.as_str(), "Room status resynced");
    }

    Ok(())
}
