//! `RocksDB` storage layer for the cuentas service.
//!
//! This crate provides persistent storage for account records using
//! `RocksDB` with CBOR-encoded documents.
//!
//! # Architecture
//!
//! A single `accounts` column family holds the primary account records,
//! keyed by the ULID bytes of the account ID. Balance-mutating operations
//! (deposit, withdraw) are applied as one guarded read-modify-write so the
//! balance change and the transaction counter increment cannot interleave
//! with a concurrent request.
//!
//! # Example
//!
//! ```no_run
//! use cuentas_store::{RocksStore, Store};
//! use cuentas_core::NewAccount;
//!
//! let store = RocksStore::open("/tmp/cuentas-db").unwrap();
//!
//! let account = store
//!     .create_account(NewAccount {
//!         owner_name: "Ana".into(),
//!         account_number: 1001,
//!         balance: 500,
//!         transaction_counter: None,
//!     })
//!     .unwrap();
//!
//! let after = store.withdraw(&account.id, 100).unwrap();
//! assert_eq!(after.balance, 400);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use cuentas_core::{Account, AccountId, AccountUpdate, NewAccount};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    /// Create a new account, assigning its ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn create_account(&self, data: NewAccount) -> Result<Account>;

    /// List all accounts. Order is not guaranteed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Get an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, id: &AccountId) -> Result<Option<Account>>;

    /// Apply a partial update to an account and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn update_account(&self, id: &AccountId, update: AccountUpdate) -> Result<Account>;

    /// Delete an account and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn delete_account(&self, id: &AccountId) -> Result<Account>;

    /// Deposit into an account: `balance += amount`, counter incremented,
    /// applied as a single atomic update. Returns the updated record.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidAmount` if `amount <= 0`.
    /// - `StoreError::NotFound` if the account doesn't exist.
    fn deposit(&self, id: &AccountId, amount: i64) -> Result<Account>;

    /// Withdraw from an account: `balance -= amount`, counter incremented,
    /// guarded by a sufficient-funds check and applied as a single atomic
    /// update. Returns the updated record.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidAmount` if `amount <= 0`.
    /// - `StoreError::NotFound` if the account doesn't exist.
    /// - `StoreError::InsufficientFunds` if `balance < amount`.
    fn withdraw(&self, id: &AccountId, amount: i64) -> Result<Account>;

    /// Set `transactionCounter = 0` on every stored document lacking the
    /// field. Returns the number of documents rewritten. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn backfill_counters(&self) -> Result<u64>;
}
