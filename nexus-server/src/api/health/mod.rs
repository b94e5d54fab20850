//! Health check routes
//!
//! `/health` answers cheaply for liveness probes; `/health/detailed`
//! exercises each component the workflow depends on (database ping with
//! latency, receipt store directory).

use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
    receipt_store: CheckResult,
}

/// Outcome of one component check
#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok(latency_ms: Option<u64>) -> Self {
        Self {
            status: "ok",
            latency_ms,
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// Initialized on the first health request, so uptime is measured from
// there rather than process start.
static STARTED: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

fn uptime_seconds() -> u64 {
    STARTED.get_or_init(Instant::now).elapsed().as_secs()
}

/// Basic liveness check
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
    })
}

async fn check_database(state: &ServerState) -> CheckResult {
    let started = Instant::now();
    match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => CheckResult::ok(Some(started.elapsed().as_millis() as u64)),
        Err(e) => CheckResult::error(format!("Database error: {e}")),
    }
}

fn check_receipt_store(state: &ServerState) -> CheckResult {
    match std::fs::metadata(state.config.receipts_dir()) {
        Ok(meta) if meta.is_dir() => CheckResult::ok(None),
        Ok(_) => CheckResult::error("Receipt path is not a directory"),
        Err(e) => CheckResult::error(format!("Receipt store error: {e}")),
    }
}

/// Per-component health with latency
pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let database = check_database(&state).await;
    let receipt_store = check_receipt_store(&state);
    let all_ok = database.is_ok() && receipt_store.is_ok();

    Json(DetailedHealthResponse {
        status: if all_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime_seconds(),
        checks: HealthChecks {
            database,
            receipt_store,
        },
    })
}
