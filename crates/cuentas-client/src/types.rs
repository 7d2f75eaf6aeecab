//! Wire types for the cuentas API.
//!
//! Account bodies reuse the core types directly; this module holds the
//! request/response shapes that only exist on the wire.

use serde::{Deserialize, Serialize};

/// Deposit/withdraw request body.
#[derive(Debug, Clone, Serialize)]
pub struct AmountRequest {
    /// Amount in minor units; must be positive.
    pub monto: i64,
}

/// Delete confirmation response.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    /// Whether the account was deleted.
    pub deleted: bool,
    /// Confirmation message.
    pub message: String,
}

/// Backfill response.
#[derive(Debug, Clone, Deserialize)]
pub struct BackfillResponse {
    /// Number of documents rewritten with a default counter.
    pub backfilled: u64,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Error response envelope returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error body.
    pub error: ApiErrorBody,
}

/// Error body inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Optional structured details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
