//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, health, maintenance, operations};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Accounts
/// - `POST /api/cuentas` - Create an account
/// - `GET /api/cuentas` - List all accounts
/// - `GET /api/cuentas/:id` - Get an account by ID
/// - `PUT /api/cuentas/:id` - Apply a partial update
/// - `DELETE /api/cuentas/:id` - Delete an account
///
/// ## Operations
/// - `POST /api/cuentas/consignar/:id` - Deposit into an account
/// - `PUT /api/cuentas/retirar/:id` - Withdraw from an account
///
/// ## Maintenance
/// - `POST /api/mantenimiento/contadores` - Backfill missing counters
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Accounts
        .route("/api/cuentas", post(accounts::create_account))
        .route("/api/cuentas", get(accounts::list_accounts))
        .route("/api/cuentas/:id", get(accounts::get_account))
        .route("/api/cuentas/:id", put(accounts::update_account))
        .route("/api/cuentas/:id", delete(accounts::delete_account))
        // Operations
        .route("/api/cuentas/consignar/:id", post(operations::deposit))
        .route("/api/cuentas/retirar/:id", put(operations::withdraw))
        // Maintenance
        .route(
            "/api/mantenimiento/contadores",
            post(maintenance::backfill_counters),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
