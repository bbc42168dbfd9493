//! Invoice and payment handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use frontdesk_core::error::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{CreatePayment, Invoice, InvoiceStatus, Payment, PaymentMethod};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct SetInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state
        .db
        .get_invoice(invoice_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;
    Ok(Json(invoice))
}

/// Invoice lookup from a reservation; every reservation owns exactly one.
pub async fn get_reservation_invoice(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state
        .db
        .get_invoice_by_reservation(reservation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;
    Ok(Json(invoice))
}

/// Staff decision; payment sums never flip this automatically.
pub async fn set_invoice_status(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
    Json(payload): Json<SetInvoiceStatusRequest>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state
        .db
        .set_invoice_status(invoice_id, payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;
    Ok(Json(invoice))
}

pub async fn record_payment(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Payment amount must be positive"
        )));
    }

    let input = CreatePayment {
        invoice_id,
        amount: payload.amount,
        method: payload.method,
    };
    let payment = state.db.record_payment(&input).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_payments(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = state.db.list_payments(invoice_id).await?;
    Ok(Json(payments))
}
