//! Cuentas Client SDK.
//!
//! This crate provides a client library for interacting with the cuentas
//! account-management API.
//!
//! # Example
//!
//! ```no_run
//! use cuentas_client::CuentasClient;
//! use cuentas_core::NewAccount;
//!
//! # async fn example() -> Result<(), cuentas_client::ClientError> {
//! let client = CuentasClient::new("http://localhost:8080");
//!
//! let account = client
//!     .create_account(NewAccount {
//!         owner_name: "Ana".to_string(),
//!         account_number: 1001,
//!         balance: 500,
//!         transaction_counter: None,
//!     })
//!     .await?;
//!
//! let after = client.withdraw(&account.id, 100).await?;
//! println!("New balance: {}", after.balance);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, CuentasClient};
pub use error::ClientError;
pub use types::*;
