use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::membership::MembershipService;
use crate::storage::ReceiptStore;
use crate::utils::AppError;

/// Shared server state - cheap to clone, handed to every handler
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Configuration (immutable) |
/// | pool | SQLite connection pool |
/// | receipts | Content-addressed receipt blob store |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Receipt blob store
    pub receipts: Arc<ReceiptStore>,
}

impl ServerState {
    /// Initialize server state
    ///
    /// 1. Ensure the work directory structure exists
    /// 2. Open the database (work_dir/database/nexus.db) and run migrations
    /// 3. Initialize the receipt store (work_dir/uploads/receipts)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("nexus.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let receipts = ReceiptStore::new(config.receipts_dir());
        receipts.init()?;

        Ok(Self {
            config: config.clone(),
            pool: db_service.pool,
            receipts: Arc::new(receipts),
        })
    }

    /// Workflow service over the pool and receipt store
    pub fn membership_service(&self) -> MembershipService {
        MembershipService::new(self.pool.clone(), self.receipts.clone())
    }
}
