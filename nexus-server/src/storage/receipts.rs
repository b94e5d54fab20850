//! Receipt Blob Store
//!
//! Content-addressed storage for uploaded proof-of-payment files. A
//! receipt ref is the SHA-256 of the bytes, so re-uploading the same file
//! returns the same ref instead of a second copy. Files live under
//! two-character fan-out directories (`ab/abc123…`).
//!
//! The payment workflow requires the blob to be durably on disk before a
//! record may transition to Verifying; `store` fsyncs before returning.

use sha2::{Digest, Sha256};
use shared::{AppError, ErrorCode};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Maximum receipt size (5MB)
const MAX_RECEIPT_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug)]
pub struct ReceiptStore {
    root: PathBuf,
}

impl ReceiptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage root if missing
    pub fn init(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).map_err(|e| {
            AppError::with_message(
                ErrorCode::ReceiptStorageFailed,
                format!("Failed to create receipt directory: {e}"),
            )
        })
    }

    fn path_for(&self, receipt_ref: &str) -> PathBuf {
        self.root.join(&receipt_ref[..2]).join(receipt_ref)
    }

    /// A valid ref is 64 lowercase hex characters (a SHA-256 digest)
    fn validate_ref(receipt_ref: &str) -> Result<(), AppError> {
        let valid = receipt_ref.len() == 64
            && receipt_ref
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if valid {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::InvalidReceiptRef).with_detail("receipt_ref", receipt_ref))
        }
    }

    /// Store receipt bytes, returning their content-addressed ref.
    ///
    /// Idempotent: the same bytes always produce the same ref.
    pub fn store(&self, data: &[u8]) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::new(ErrorCode::EmptyReceipt));
        }
        if data.len() > MAX_RECEIPT_SIZE {
            return Err(AppError::with_message(
                ErrorCode::ReceiptTooLarge,
                format!(
                    "Receipt is {} bytes, maximum is {} bytes ({}MB)",
                    data.len(),
                    MAX_RECEIPT_SIZE,
                    MAX_RECEIPT_SIZE / 1024 / 1024
                ),
            ));
        }

        let receipt_ref = hex::encode(Sha256::digest(data));
        let path = self.path_for(&receipt_ref);

        if path.exists() {
            tracing::debug!(receipt_ref = %receipt_ref, "Duplicate receipt, returning existing ref");
            return Ok(receipt_ref);
        }

        let storage_err = |e: std::io::Error| {
            AppError::with_message(
                ErrorCode::ReceiptStorageFailed,
                format!("Failed to write receipt: {e}"),
            )
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(storage_err)?;
        }

        // fsync: the ref must be durable before any record points at it
        let mut file = fs::File::create(&path).map_err(storage_err)?;
        file.write_all(data).map_err(storage_err)?;
        file.sync_all().map_err(storage_err)?;

        tracing::info!(
            receipt_ref = %receipt_ref,
            size = data.len(),
            "Receipt stored"
        );

        Ok(receipt_ref)
    }

    /// Whether a previously stored receipt exists for this ref
    pub fn exists(&self, receipt_ref: &str) -> bool {
        Self::validate_ref(receipt_ref).is_ok() && self.path_for(receipt_ref).exists()
    }

    /// Fetch receipt bytes (officer review)
    pub fn fetch(&self, receipt_ref: &str) -> Result<Vec<u8>, AppError> {
        Self::validate_ref(receipt_ref)?;
        match fs::read(self.path_for(receipt_ref)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::new(
                ErrorCode::ReceiptNotFound,
            )
            .with_detail("receipt_ref", receipt_ref)),
            Err(e) => Err(AppError::with_message(
                ErrorCode::ReceiptStorageFailed,
                format!("Failed to read receipt: {e}"),
            )),
        }
    }
}
