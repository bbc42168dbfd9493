//! Dashboard statistics: read-only aggregation for the reception screens.
//! Nothing here writes back into the booking path.

use axum::{extract::State, Json};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use frontdesk_core::error::AppError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::Reservation;
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyRevenue {
    pub month: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub occupation_rate: f64,
    pub occupied_rooms: i64,
    pub total_rooms: i64,
    pub monthly_revenue: Decimal,
    pub upcoming_reservations: i64,
    pub total_clients: i64,
    pub reservations_by_category: Vec<CategoryCount>,
    pub revenue_trend: Vec<MonthlyRevenue>,
    pub room_status: HashMap<String, i64>,
    pub recent_reservations: Vec<Reservation>,
}

pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let today = Utc::now().date_naive();
    let start_of_month = today.with_day(1).unwrap_or(today);

    let status_counts = state.db.room_status_counts().await?;
    let total_rooms: i64 = status_counts.iter().map(|(_, count)| count).sum();
    let occupied_rooms = status_counts
        .iter()
        .find(|(status, _)| status == "occupied")
        .map(|(_, count)| *count)
        .unwrap_or(0);
    let occupation_rate = if total_rooms > 0 {
        (occupied_rooms as f64 / total_rooms as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    let monthly_revenue = state.db.revenue_since(start_of_month).await?;
    let upcoming_reservations = state.db.count_upcoming_reservations(today).await?;
    let total_clients = state.db.count_clients().await?;

    let reservations_by_category = state
        .db
        .reservations_by_category()
        .await?
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    let revenue_trend = state
        .db
        .revenue_by_month(today - Duration::days(180))
        .await?
        .into_iter()
        .map(|(month, total)| MonthlyRevenue { month, total })
        .collect();

    let recent_reservations = state.db.recent_reservations().await?;
    let room_status: HashMap<String, i64> = status_counts.into_iter().collect();

    Ok(Json(DashboardStats {
        occupation_rate,
        occupied_rooms,
        total_rooms,
        monthly_revenue,
        upcoming_reservations,
        total_clients,
        reservations_by_category,
        revenue_trend,
        room_status,
        recent_reservations,
    }))
}
