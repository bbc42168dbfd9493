//! Invoice model and stay pricing for frontdesk-service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice status. Set by staff; payments do not transition it automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Partial,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Partial => "partial",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "paid" => InvoiceStatus::Paid,
            "partial" => InvoiceStatus::Partial,
            _ => InvoiceStatus::Unpaid,
        }
    }
}

/// Invoice, owned one-to-one by its reservation.
///
/// `total_amount` is null until first computed, and frozen afterwards: later
/// date changes on the reservation do not recompute it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub invoice_id: Uuid,
    pub reservation_id: Uuid,
    pub issued_utc: DateTime<Utc>,
    pub total_amount: Option<Decimal>,
    pub status: String,
}

/// Number of billable nights for a stay, floored to one.
pub fn stay_nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        1
    } else {
        nights
    }
}

/// Total amount for a stay: billable nights times the room's nightly rate.
pub fn stay_total(check_in: NaiveDate, check_out: NaiveDate, price_per_night: Decimal) -> Decimal {
    Decimal::from(stay_nights(check_in, check_out)) * price_per_night
}
