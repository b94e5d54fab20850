//! Payment rail QR code repository

use super::RepoResult;
use shared::models::{PaymentMethod, QrCode};
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, method: PaymentMethod) -> RepoResult<Option<QrCode>> {
    let row = sqlx::query_as::<_, QrCode>(
        "SELECT payment_method, qr_ref, updated_at FROM qr_code WHERE payment_method = ?",
    )
    .bind(method.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert or replace the QR code for a payment rail.
pub async fn upsert(pool: &SqlitePool, method: PaymentMethod, qr_ref: &str) -> RepoResult<QrCode> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO qr_code (payment_method, qr_ref, updated_at) VALUES (?1, ?2, ?3) \
         ON CONFLICT(payment_method) DO UPDATE SET qr_ref = excluded.qr_ref, updated_at = excluded.updated_at",
    )
    .bind(method.as_str())
    .bind(qr_ref)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(QrCode {
        payment_method: method,
        qr_ref: qr_ref.to_string(),
        updated_at: now,
    })
}
