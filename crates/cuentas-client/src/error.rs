//! Client error types.

/// Errors that can occur when using the cuentas client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Account not found.
    #[error("account not found: {message}")]
    NotFound {
        /// Server-provided message.
        message: String,
    },

    /// Insufficient funds for a withdrawal.
    #[error("insufficient funds: balance={balance}, requested={requested}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Requested amount.
        requested: i64,
    },
}
