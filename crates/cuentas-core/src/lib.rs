//! Core types for the cuentas account-management service.
//!
//! This crate provides the foundational types used throughout the platform:
//!
//! - **Identifiers**: `AccountId`
//! - **Accounts**: `Account`, `NewAccount`, `AccountUpdate`
//!
//! # Money representation
//!
//! Balances and amounts are stored as `i64` minor units (integer cents)
//! to avoid floating point precision issues.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod ids;

pub use account::{Account, AccountUpdate, NewAccount};
pub use ids::{AccountId, IdError};
