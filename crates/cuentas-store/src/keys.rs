//! Key encoding utilities for `RocksDB`.

use cuentas_core::AccountId;

/// Create an account key from an account ID.
///
/// ULIDs are time-ordered, so iterating the accounts column family yields
/// records in creation order.
#[must_use]
pub fn account_key(account_id: &AccountId) -> Vec<u8> {
    account_id.to_bytes().to_vec()
}
