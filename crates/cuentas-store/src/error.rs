//! Error types for cuentas storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("not found")]
    NotFound,

    /// Insufficient funds for a withdrawal.
    #[error("insufficient funds: balance={balance}, requested={requested}")]
    InsufficientFunds {
        /// Current balance in minor units.
        balance: i64,
        /// Requested withdrawal amount in minor units.
        requested: i64,
    },

    /// Deposit or withdrawal amount must be positive.
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),
}
