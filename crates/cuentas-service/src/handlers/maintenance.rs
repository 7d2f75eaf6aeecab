//! Maintenance handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use cuentas_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Backfill response.
#[derive(Debug, Serialize)]
pub struct BackfillResponse {
    /// Number of documents rewritten with a default counter.
    pub backfilled: u64,
}

/// Backfill the transaction counter on legacy records lacking it.
///
/// Idempotent; a second invocation rewrites nothing.
pub async fn backfill_counters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BackfillResponse>, ApiError> {
    let backfilled = state.store.backfill_counters()?;

    tracing::info!(backfilled, "Counter backfill completed");

    Ok(Json(BackfillResponse { backfilled }))
}
