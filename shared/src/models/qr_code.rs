//! Payment rail QR code model

use super::membership::PaymentMethod;
use serde::{Deserialize, Serialize};

/// Uploaded QR code for one payment rail
///
/// Display-only: the selected rail determines which code the member sees
/// before the out-of-band transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct QrCode {
    pub payment_method: PaymentMethod,
    pub qr_ref: String,
    pub updated_at: i64,
}
