//! Database service for frontdesk-service.

use crate::models::{
    Client, CreateClient, CreatePayment, CreateRoom, CreateUser, Invoice, InvoiceStatus,
    ListReservationsFilter, ListRoomsFilter, Payment, Reservation, Room, RoomStatus, UpdateClient,
    UpdateRoom, User,
};
use crate::services::metrics::{DB_QUERY_DURATION, PAYMENT_AMOUNT_TOTAL};
use chrono::NaiveDate;
use frontdesk_core::error::AppError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

const ROOM_COLUMNS: &str = "room_id, number, category, price_per_night, capacity, status, created_utc";
const CLIENT_COLUMNS: &str = "client_id, first_name, last_name, email, phone, id_document, created_utc";
const RESERVATION_COLUMNS: &str =
    "reservation_id, client_id, room_id, check_in, check_out, status, created_utc";
const INVOICE_COLUMNS: &str = "invoice_id, reservation_id, issued_utc, total_amount, status";
const PAYMENT_COLUMNS: &str = "payment_id, invoice_id, amount, method, paid_utc";
const USER_COLUMNS: &str = "user_id, username, full_name, email, role, phone, created_utc";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "frontdesk-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Room Operations
    // -------------------------------------------------------------------------

    /// Create a new room.
    #[instrument(skip(self, input), fields(number = %input.number))]
    pub async fn create_room(&self, input: &CreateRoom) -> Result<Room, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_room"])
            .start_timer();

        let room_id = Uuid::new_v4();
        let room = sqlx::query_as::<_, Room>(&format!(
            r#"
            INSERT INTO rooms (room_id, number, category, price_per_night, capacity, status)
            VALUES ($1, $2, $3, $4, $5, 'free')
            RETURNING {ROOM_COLUMNS}
            "#,
        ))
        .bind(room_id)
        .bind(&input.number)
        .bind(input.category.as_str())
        .bind(input.price_per_night)
        .bind(input.capacity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!("Room '{}' already exists", input.number))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create room: {}", e)),
        })?;

        timer.observe_duration();

        info!(room_id = %room.room_id, number = %room.number, "Room created");

        Ok(room)
    }

    /// Get a room by ID.
    #[instrument(skip(self), fields(room_id = %room_id))]
    pub async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_room"])
            .start_timer();

        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE room_id = $1"
        ))
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get room: {}", e)))?;

        timer.observe_duration();

        Ok(room)
    }

    /// List rooms, optionally filtered by status and category, ordered by number.
    #[instrument(skip(self, filter))]
    pub async fn list_rooms(&self, filter: &ListRoomsFilter) -> Result<Vec<Room>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_rooms"])
            .start_timer();

        let status = filter.status.map(|s| s.as_str().to_string());
        let category = filter.category.map(|c| c.as_str().to_string());

        let rooms = sqlx::query_as::<_, Room>(&format!(
            r#"
            SELECT {ROOM_COLUMNS}
            FROM rooms
            WHERE ($1::varchar IS NULL OR status = $1)
              AND ($2::varchar IS NULL OR category = $2)
            ORDER BY number
            "#,
        ))
        .bind(&status)
        .bind(&category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list rooms: {}", e)))?;

        timer.observe_duration();

        Ok(rooms)
    }

    /// Update a room's attributes (not its status).
    #[instrument(skip(self, input), fields(room_id = %room_id))]
    pub async fn update_room(
        &self,
        room_id: Uuid,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_room"])
            .start_timer();

        let category = input.category.map(|c| c.as_str().to_string());

        let room = sqlx::query_as::<_, Room>(&format!(
            r#"
            UPDATE rooms
            SET category = COALESCE($2, category),
                price_per_night = COALESCE($3, price_per_night),
                capacity = COALESCE($4, capacity)
            WHERE room_id = $1
            RETURNING {ROOM_COLUMNS}
            "#,
        ))
        .bind(room_id)
        .bind(&category)
        .bind(input.price_per_night)
        .bind(input.capacity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update room: {}", e)))?;

        timer.observe_duration();

        Ok(room)
    }

    /// Manually set a room's status.
    ///
    /// This is the Maintenance switch: while a room is in `maintenance` the
    /// occupancy synchronizer leaves it untouched. Setting any other status
    /// puts the room back under automatic derivation.
    #[instrument(skip(self), fields(room_id = %room_id, status = status.as_str()))]
    pub async fn set_room_status(
        &self,
        room_id: Uuid,
        status: RoomStatus,
    ) -> Result<Option<Room>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["set_room_status"])
            .start_timer();

        let room = sqlx::query_as::<_, Room>(&format!(
            "UPDATE rooms SET status = $2 WHERE room_id = $1 RETURNING {ROOM_COLUMNS}"
        ))
        .bind(room_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to set room status: {}", e))
        })?;

        timer.observe_duration();

        if let Some(ref r) = room {
            info!(room_id = %r.room_id, status = %r.status, "Room status set manually");
        }

        Ok(room)
    }

    // -------------------------------------------------------------------------
    // Client Operations
    // -------------------------------------------------------------------------

    /// Register a new client.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_client(&self, input: &CreateClient) -> Result<Client, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_client"])
            .start_timer();

        let client_id = Uuid::new_v4();
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO clients (client_id, first_name, last_name, email, phone, id_document)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CLIENT_COLUMNS}
            "#,
        ))
        .bind(client_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.id_document)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "A client with email '{}' already exists",
                    input.email
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create client: {}", e)),
        })?;

        timer.observe_duration();

        info!(client_id = %client.client_id, "Client created");

        Ok(client)
    }

    /// Get a client by ID.
    #[instrument(skip(self), fields(client_id = %client_id))]
    pub async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_client"])
            .start_timer();

        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE client_id = $1"
        ))
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get client: {}", e)))?;

        timer.observe_duration();

        Ok(client)
    }

    /// List clients, most recent first.
    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_clients"])
            .start_timer();

        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY created_utc DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list clients: {}", e)))?;

        timer.observe_duration();

        Ok(clients)
    }

    /// Update a client's contact details.
    #[instrument(skip(self, input), fields(client_id = %client_id))]
    pub async fn update_client(
        &self,
        client_id: Uuid,
        input: &UpdateClient,
    ) -> Result<Option<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_client"])
            .start_timer();

        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients
            SET email = COALESCE($2, email),
                phone = COALESCE($3, phone)
            WHERE client_id = $1
            RETURNING {CLIENT_COLUMNS}
            "#,
        ))
        .bind(client_id)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!("A client with that email already exists"))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to update client: {}", e)),
        })?;

        timer.observe_duration();

        Ok(client)
    }

    // -------------------------------------------------------------------------
    // Reservation Reads
    // -------------------------------------------------------------------------
    // Reservation writes go through BookingService so validation, invoicing
    // and room resync happen in one transaction.

    /// Get a reservation by ID.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn get_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<Option<Reservation>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_reservation"])
            .start_timer();

        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get reservation: {}", e))
        })?;

        timer.observe_duration();

        Ok(reservation)
    }

    /// List current and upcoming reservations (check-out today or later),
    /// optionally filtered by status, ordered by check-in.
    #[instrument(skip(self, filter))]
    pub async fn list_reservations(
        &self,
        filter: &ListReservationsFilter,
        today: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_reservations"])
            .start_timer();

        let status = filter.status.map(|s| s.as_str().to_string());

        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations
            WHERE check_out >= $1
              AND ($2::varchar IS NULL OR status = $2)
            ORDER BY check_in
            "#,
        ))
        .bind(today)
        .bind(&status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list reservations: {}", e))
        })?;

        timer.observe_duration();

        Ok(reservations)
    }

    // -------------------------------------------------------------------------
    // Invoice Operations
    // -------------------------------------------------------------------------

    /// Get an invoice by ID.
    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn get_invoice(&self, invoice_id: Uuid) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_invoice"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE invoice_id = $1"
        ))
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get invoice: {}", e)))?;

        timer.observe_duration();

        Ok(invoice)
    }

    /// Get the invoice owned by a reservation.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn get_invoice_by_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_invoice_by_reservation"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get invoice: {}", e)))?;

        timer.observe_duration();

        Ok(invoice)
    }

    /// Set an invoice's payment status. Payments never transition this
    /// automatically; it is a staff decision.
    #[instrument(skip(self), fields(invoice_id = %invoice_id, status = status.as_str()))]
    pub async fn set_invoice_status(
        &self,
        invoice_id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["set_invoice_status"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "UPDATE invoices SET status = $2 WHERE invoice_id = $1 RETURNING {INVOICE_COLUMNS}"
        ))
        .bind(invoice_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to set invoice status: {}", e))
        })?;

        timer.observe_duration();

        if let Some(ref inv) = invoice {
            info!(invoice_id = %inv.invoice_id, status = %inv.status, "Invoice status updated");
        }

        Ok(invoice)
    }

    // -------------------------------------------------------------------------
    // Payment Operations
    // -------------------------------------------------------------------------

    /// Record a payment against an invoice.
    #[instrument(skip(self, input), fields(invoice_id = %input.invoice_id))]
    pub async fn record_payment(&self, input: &CreatePayment) -> Result<Payment, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["record_payment"])
            .start_timer();

        let invoice = self.get_invoice(input.invoice_id).await?;
        if invoice.is_none() {
            return Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")));
        }

        let payment_id = Uuid::new_v4();
        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (payment_id, invoice_id, amount, method)
            VALUES ($1, $2, $3, $4)
            RETURNING {PAYMENT_COLUMNS}
            "#,
        ))
        .bind(payment_id)
        .bind(input.invoice_id)
        .bind(input.amount)
        .bind(input.method.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to record payment: {}", e)))?;

        timer.observe_duration();

        PAYMENT_AMOUNT_TOTAL
            .with_label_values(&[input.method.as_str()])
            .inc_by(payment.amount.to_f64().unwrap_or(0.0));

        info!(
            payment_id = %payment.payment_id,
            amount = %payment.amount,
            method = %payment.method,
            "Payment recorded"
        );

        Ok(payment)
    }

    /// List payments for an invoice, oldest first.
    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn list_payments(&self, invoice_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_payments"])
            .start_timer();

        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE invoice_id = $1 ORDER BY paid_utc"
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list payments: {}", e)))?;

        timer.observe_duration();

        Ok(payments)
    }

    // -------------------------------------------------------------------------
    // Staff User Operations
    // -------------------------------------------------------------------------

    /// Create a staff account.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: &CreateUser) -> Result<User, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_user"])
            .start_timer();

        let user_id = Uuid::new_v4();
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (user_id, username, full_name, email, role, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(&input.username)
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(input.role.as_str())
        .bind(&input.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "User '{}' already exists",
                    input.username
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create user: {}", e)),
        })?;

        timer.observe_duration();

        info!(user_id = %user.user_id, role = %user.role, "Staff user created");

        Ok(user)
    }

    /// List staff accounts.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_users"])
            .start_timer();

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list users: {}", e)))?;

        timer.observe_duration();

        Ok(users)
    }

    // -------------------------------------------------------------------------
    // Dashboard Aggregates
    // -------------------------------------------------------------------------
    // Read-only reporting over the same tables; nothing here writes back.

    /// Count rooms grouped by status.
    #[instrument(skip(self))]
    pub async fn room_status_counts(&self) -> Result<Vec<(String, i64)>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["room_status_counts"])
            .start_timer();

        let counts: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM rooms GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to count room statuses: {}", e))
                })?;

        timer.observe_duration();

        Ok(counts)
    }

    /// Sum of payments received since a given date.
    #[instrument(skip(self))]
    pub async fn revenue_since(&self, since: NaiveDate) -> Result<Decimal, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["revenue_since"])
            .start_timer();

        let total: Option<Decimal> = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE paid_utc >= $1::date",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to sum revenue: {}", e))
        })?;

        timer.observe_duration();

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    /// Monthly payment totals since a given date, oldest month first.
    #[instrument(skip(self))]
    pub async fn revenue_by_month(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<(NaiveDate, Decimal)>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["revenue_by_month"])
            .start_timer();

        let rows: Vec<(NaiveDate, Decimal)> = sqlx::query_as(
            r#"
            SELECT date_trunc('month', paid_utc)::date AS month, SUM(amount) AS total
            FROM payments
            WHERE paid_utc >= $1::date
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to compute revenue trend: {}", e))
        })?;

        timer.observe_duration();

        Ok(rows)
    }

    /// Count reservations with a check-in today or later, in the given statuses.
    #[instrument(skip(self))]
    pub async fn count_upcoming_reservations(
        &self,
        today: NaiveDate,
    ) -> Result<i64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["count_upcoming_reservations"])
            .start_timer();

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM reservations
            WHERE check_in >= $1 AND status IN ('confirmed', 'pending')
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to count reservations: {}", e))
        })?;

        timer.observe_duration();

        Ok(count)
    }

    /// Count all registered clients.
    #[instrument(skip(self))]
    pub async fn count_clients(&self) -> Result<i64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["count_clients"])
            .start_timer();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to count clients: {}", e))
            })?;

        timer.observe_duration();

        Ok(count)
    }

    /// Reservation counts grouped by room category, most booked first.
    #[instrument(skip(self))]
    pub async fn reservations_by_category(&self) -> Result<Vec<(String, i64)>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["reservations_by_category"])
            .start_timer();

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT r.category, COUNT(res.reservation_id) AS count
            FROM reservations res
            JOIN rooms r ON r.room_id = res.room_id
            GROUP BY r.category
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Failed to count reservations by category: {}",
                e
            ))
        })?;

        timer.observe_duration();

        Ok(rows)
    }

    /// The five most recently created reservations.
    #[instrument(skip(self))]
    pub async fn recent_reservations(&self) -> Result<Vec<Reservation>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["recent_reservations"])
            .start_timer();

        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY created_utc DESC LIMIT 5"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list recent reservations: {}", e))
        })?;

        timer.observe_duration();

        Ok(reservations)
    }
}
