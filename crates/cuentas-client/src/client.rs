//! Cuentas HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use cuentas_core::{Account, AccountId, AccountUpdate, NewAccount};

use crate::error::ClientError;
use crate::types::{
    AmountRequest, ApiErrorResponse, BackfillResponse, DeleteResponse, HealthResponse,
};

/// Cuentas API client.
///
/// Provides methods for managing accounts and applying deposit/withdraw
/// operations.
#[derive(Debug, Clone)]
pub struct CuentasClient {
    client: Client,
    base_url: String,
}

impl CuentasClient {
    /// Create a new cuentas client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the cuentas service (e.g., `"http://localhost:8080"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new cuentas client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Check service health.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_account(&self, data: NewAccount) -> Result<Account, ClientError> {
        let url = format!("{}/api/cuentas", self.base_url);
        let response = self.client.post(&url).json(&data).send().await?;
        Self::handle_response(response).await
    }

    /// List all accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ClientError> {
        let url = format!("{}/api/cuentas", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Get an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the account doesn't exist.
    pub async fn get_account(&self, id: &AccountId) -> Result<Account, ClientError> {
        let url = format!("{}/api/cuentas/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Apply a partial update to an account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the account doesn't exist.
    pub async fn update_account(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Account, ClientError> {
        let url = format!("{}/api/cuentas/{id}", self.base_url);
        let response = self.client.put(&url).json(&update).send().await?;
        Self::handle_response(response).await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the account doesn't exist.
    pub async fn delete_account(&self, id: &AccountId) -> Result<DeleteResponse, ClientError> {
        let url = format!("{}/api/cuentas/{id}", self.base_url);
        let response = self.client.delete(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Deposit into an account (`consignar`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the account doesn't exist.
    pub async fn deposit(&self, id: &AccountId, monto: i64) -> Result<Account, ClientError> {
        let url = format!("{}/api/cuentas/consignar/{id}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AmountRequest { monto })
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Withdraw from an account (`retirar`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientFunds` if the balance is too low,
    /// `ClientError::NotFound` if the account doesn't exist.
    pub async fn withdraw(&self, id: &AccountId, monto: i64) -> Result<Account, ClientError> {
        let url = format!("{}/api/cuentas/retirar/{id}", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(&AmountRequest { monto })
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Trigger the transaction-counter backfill.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn backfill_counters(&self) -> Result<BackfillResponse, ClientError> {
        let url = format!("{}/api/mantenimiento/contadores", self.base_url);
        let response = self.client.post(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let message = api_error.error.message;

                // Map specific error codes to typed errors
                match code {
                    "not_found" => Err(ClientError::NotFound { message }),
                    "insufficient_funds" => {
                        let balance = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("balance"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);
                        let requested = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("requested"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);

                        Err(ClientError::InsufficientFunds { balance, requested })
                    }
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = CuentasClient::new("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = CuentasClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
