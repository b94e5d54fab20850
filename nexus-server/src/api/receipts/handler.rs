//! Receipt Upload / Fetch Handlers
//!
//! Receipt bytes are opaque to the server; validation is size only. The
//! blob is durable once `upload` returns, so the ref it hands back is safe
//! to submit against.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Upload response
#[derive(Debug, Serialize)]
pub struct ReceiptUploadResponse {
    pub receipt_ref: String,
    pub size: usize,
}

/// Pull the bytes of the `file` field out of a multipart request.
async fn read_file_field(multipart: &mut Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(AppError::new(ErrorCode::NoFileProvided))
}

/// POST /api/receipts - upload a proof-of-payment file
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<ReceiptUploadResponse>> {
    let data = read_file_field(&mut multipart).await?;
    let receipt_ref = state.receipts.store(&data)?;

    Ok(Json(ReceiptUploadResponse {
        receipt_ref,
        size: data.len(),
    }))
}

/// GET /api/receipts/{receipt_ref} - fetch receipt bytes (officer review)
pub async fn fetch(
    State(state): State<ServerState>,
    Path(receipt_ref): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = state.receipts.fetch(&receipt_ref)?;
    Ok((
        [(http::header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    ))
}
