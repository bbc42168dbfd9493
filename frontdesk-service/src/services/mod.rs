//! Services for frontdesk-service.

pub mod booking;
pub mod database;
pub mod metrics;

pub use booking::BookingService;
pub use database::Database;
pub use metrics::{get_metrics, init_metrics, track_http_metrics};
