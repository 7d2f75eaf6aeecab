//! Deposit and withdraw handlers.
//!
//! Both operations adjust the balance and increment the transaction counter
//! as a single atomic store update.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use cuentas_core::AccountId;
use cuentas_store::Store;

use crate::error::ApiError;
use crate::handlers::accounts::AccountResponse;
use crate::state::AppState;

/// Deposit/withdraw request body.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount in minor units; must be positive.
    pub monto: i64,
}

/// Deposit into an account (`consignar`).
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AccountId>,
    Json(body): Json<AmountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.store.deposit(&id, body.monto)?;

    tracing::info!(
        account_id = %id,
        amount = body.monto,
        balance = account.balance,
        "Deposit applied"
    );

    Ok(Json(AccountResponse::from(&account)))
}

/// Withdraw from an account (`retirar`).
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AccountId>,
    Json(body): Json<AmountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.store.withdraw(&id, body.monto)?;

    tracing::info!(
        account_id = %id,
        amount = body.monto,
        balance = account.balance,
        "Withdrawal applied"
    );

    Ok(Json(AccountResponse::from(&account)))
}
