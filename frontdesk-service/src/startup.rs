//! Application startup and lifecycle management.

use crate::config::Config;
use crate::handlers;
use crate::services::{track_http_metrics, BookingService, Database};
use axum::middleware::from_fn;
use axum::{
    routing::{get, post, put},
    Router,
};
use frontdesk_core::error::AppError;
use frontdesk_core::middleware::request_id_middleware;
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub booking: BookingService,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let db = Database::new(
            config.database.url.expose_secret(),
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        db.run_migrations().await?;

        let booking = BookingService::new(db.clone());

        let state = AppState {
            config: config.clone(),
            db,
            booking,
        };

        let router = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            // Rooms
            .route(
                "/rooms",
                get(handlers::rooms::list_rooms).post(handlers::rooms::create_room),
            )
            .route(
                "/rooms/:id",
                get(handlers::rooms::get_room).put(handlers::rooms::update_room),
            )
            .route("/rooms/:id/status", put(handlers::rooms::set_room_status))
            // Clients
            .route(
                "/clients",
                get(handlers::clients::list_clients).post(handlers::clients::create_client),
            )
            .route(
                "/clients/:id",
                get(handlers::clients::get_client).put(handlers::clients::update_client),
            )
            // Reservations
            .route(
                "/reservations",
                get(handlers::reservations::list_reservations)
                    .post(handlers::reservations::create_reservation),
            )
            .route(
                "/reservations/:id",
                get(handlers::reservations::get_reservation)
                    .put(handlers::reservations::update_reservation)
                    .delete(handlers::reservations::delete_reservation),
            )
            .route(
                "/reservations/:id/status",
                put(handlers::reservations::set_reservation_status),
            )
            .route(
                "/reservations/:id/invoice",
                get(handlers::invoices::get_reservation_invoice),
            )
            // Invoices and payments
            .route("/invoices/:id", get(handlers::invoices::get_invoice))
            .route(
                "/invoices/:id/status",
                put(handlers::invoices::set_invoice_status),
            )
            .route(
                "/invoices/:id/payments",
                get(handlers::invoices::list_payments).post(handlers::invoices::record_payment),
            )
            // Staff directory
            .route(
                "/users",
                get(handlers::users::list_users).post(handlers::users::create_user),
            )
            // Dashboard
            .route("/dashboard", get(handlers::dashboard::dashboard_stats))
            .layer(from_fn(track_http_metrics))
            .layer(from_fn(request_id_middleware))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                }),
            )
            .layer(CorsLayer::permissive())
            .with_state(state);

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("frontdesk-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
