//! Blob storage
//!
//! - [`ReceiptStore`] - content-addressed receipt storage on the local
//!   filesystem

pub mod receipts;

pub use receipts::ReceiptStore;
