//! Account management handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use cuentas_core::{Account, AccountId, AccountUpdate, NewAccount};
use cuentas_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Account response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account ID.
    pub id: String,
    /// Name of the account owner.
    pub owner_name: String,
    /// Numeric account number.
    pub account_number: i64,
    /// Current balance in minor units.
    pub balance: i64,
    /// Number of completed deposit and withdraw operations.
    pub transaction_counter: u64,
    /// Created timestamp.
    pub created_at: String,
    /// Last-updated timestamp.
    pub updated_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            owner_name: account.owner_name.clone(),
            account_number: account.account_number,
            balance: account.balance,
            transaction_counter: account.transaction_counter,
            created_at: account.created_at.to_rfc3339(),
            updated_at: account.updated_at.to_rfc3339(),
        }
    }
}

/// Create a new account.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewAccount>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let account = state.store.create_account(body)?;

    tracing::info!(account_id = %account.id, "Account created");

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// List all accounts.
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = state.store.list_accounts()?;

    Ok(Json(accounts.iter().map(AccountResponse::from).collect()))
}

/// Get an account by ID.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AccountId>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .store
        .get_account(&id)?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    Ok(Json(AccountResponse::from(&account)))
}

/// Apply a partial update to an account.
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AccountId>,
    Json(body): Json<AccountUpdate>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.store.update_account(&id, body)?;

    tracing::info!(account_id = %id, "Account updated");

    Ok(Json(AccountResponse::from(&account)))
}

/// Delete an account.
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AccountId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.store.delete_account(&id)?;

    tracing::info!(account_id = %id, "Account deleted");

    Ok(Json(serde_json::json!({
        "deleted": true,
        "message": "account deleted"
    })))
}
