//! Payment rail QR code handlers
//!
//! The selected rail only determines which QR code the member sees before
//! the out-of-band transfer; nothing here talks to a payment gateway.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::qr_code;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{PaymentMethod, QrCode};

#[derive(Debug, Serialize)]
pub struct QrCodeResponse {
    pub payment_method: PaymentMethod,
    pub qr_ref: String,
}

/// GET /api/qrcodes/{payment_method} - QR code ref for a rail
pub async fn get_by_method(
    State(state): State<ServerState>,
    Path(payment_method): Path<String>,
) -> AppResult<Json<QrCodeResponse>> {
    let method = payment_method
        .parse::<PaymentMethod>()
        .map_err(|e| AppError::with_message(ErrorCode::PaymentInvalidMethod, e.to_string()))?;

    let qr = qr_code::find(&state.pool, method)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::QrCodeNotFound).with_detail("payment_method", method.as_str())
        })?;

    Ok(Json(QrCodeResponse {
        payment_method: qr.payment_method,
        qr_ref: qr.qr_ref,
    }))
}

/// PUT /api/qrcodes - officer uploads/replaces the QR code for a rail
///
/// Multipart fields: `payment_method` (text) and `file` (image bytes).
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<QrCode>> {
    let mut method: Option<PaymentMethod> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("payment_method") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
                method = Some(text.parse::<PaymentMethod>().map_err(|e| {
                    AppError::with_message(ErrorCode::PaymentInvalidMethod, e.to_string())
                })?);
            }
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
                data = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let method = method
        .ok_or_else(|| AppError::validation("Missing 'payment_method' field"))?;
    let data = data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    let qr_ref = state.receipts.store(&data)?;
    let qr = qr_code::upsert(&state.pool, method, &qr_ref).await?;

    tracing::info!(
        payment_method = method.as_str(),
        qr_ref = %qr.qr_ref,
        "QR code uploaded"
    );
    Ok(Json(qr))
}
