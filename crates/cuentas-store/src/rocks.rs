//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options,
};
use serde::Deserialize;

use cuentas_core::{Account, AccountId, AccountUpdate, NewAccount};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes read-modify-write cycles so a balance mutation and its
    /// counter increment are atomic with respect to concurrent requests.
    write_lock: Mutex<()>,
}

/// Probe for the presence of the counter field in a stored document.
///
/// Documents written before the field existed deserialize to `None`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CounterProbe {
    transaction_counter: Option<u64>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Write an account document.
    fn put_account(&self, account: &Account) -> Result<()> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(&account.id);
        let value = Self::serialize(account)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

impl Store for RocksStore {
    fn create_account(&self, data: NewAccount) -> Result<Account> {
        let account = Account::new(AccountId::generate(), data);
        self.put_account(&account)?;

        tracing::debug!(account_id = %account.id, "account created");

        Ok(account)
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;

        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            accounts.push(Self::deserialize(&value)?);
        }

        Ok(accounts)
    }

    fn get_account(&self, id: &AccountId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn update_account(&self, id: &AccountId, update: AccountUpdate) -> Result<Account> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut account = self.get_account(id)?.ok_or(StoreError::NotFound)?;
        account.apply_update(update);
        self.put_account(&account)?;

        Ok(account)
    }

    fn delete_account(&self, id: &AccountId) -> Result<Account> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let account = self.get_account(id)?.ok_or(StoreError::NotFound)?;

        let cf = self.cf(cf::ACCOUNTS)?;
        self.db
            .delete_cf(&cf, keys::account_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(account_id = %id, "account deleted");

        Ok(account)
    }

    fn deposit(&self, id: &AccountId, amount: i64) -> Result<Account> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount(amount));
        }

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut account = self.get_account(id)?.ok_or(StoreError::NotFound)?;

        account.balance += amount;
        account.transaction_counter += 1;
        account.updated_at = chrono::Utc::now();

        self.put_account(&account)?;

        Ok(account)
    }

    fn withdraw(&self, id: &AccountId, amount: i64) -> Result<Account> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount(amount));
        }

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut account = self.get_account(id)?.ok_or(StoreError::NotFound)?;

        if !account.has_sufficient_funds(amount) {
            return Err(StoreError::InsufficientFunds {
                balance: account.balance,
                requested: amount,
            });
        }

        account.balance -= amount;
        account.transaction_counter += 1;
        account.updated_at = chrono::Utc::now();

        self.put_account(&account)?;

        Ok(account)
    }

    fn backfill_counters(&self) -> Result<u64> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let cf = self.cf(cf::ACCOUNTS)?;

        let mut backfilled = 0u64;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            let probe: CounterProbe = Self::deserialize(&value)?;
            if probe.transaction_counter.is_some() {
                continue;
            }

            // Decoding fills the missing counter with 0; rewriting persists
            // it. The record's own timestamps are left as stored.
            let account: Account = Self::deserialize(&value)?;
            let rewritten = Self::serialize(&account)?;
            self.db
                .put_cf(&cf, key, rewritten)
                .map_err(|e| StoreError::Database(e.to_string()))?;

            backfilled += 1;
        }

        if backfilled > 0 {
            tracing::info!(backfilled, "transaction counters backfilled");
        }

        Ok(backfilled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn sample_account(store: &RocksStore, balance: i64) -> Account {
        store
            .create_account(NewAccount {
                owner_name: "Ana".into(),
                account_number: 1001,
                balance,
                transaction_counter: None,
            })
            .unwrap()
    }

    #[test]
    fn account_crud() {
        let (store, _dir) = create_test_store();

        // Create
        let account = sample_account(&store, 500);
        assert_eq!(account.balance, 500);
        assert_eq!(account.transaction_counter, 0);

        // Read
        let retrieved = store.get_account(&account.id).unwrap().unwrap();
        assert_eq!(retrieved.owner_name, "Ana");
        assert_eq!(retrieved.balance, 500);

        // Update
        let updated = store
            .update_account(
                &account.id,
                AccountUpdate {
                    owner_name: Some("Carlos".into()),
                    ..AccountUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.owner_name, "Carlos");
        assert_eq!(updated.balance, 500);

        // Delete returns the removed record
        let removed = store.delete_account(&account.id).unwrap();
        assert_eq!(removed.owner_name, "Carlos");
        assert!(store.get_account(&account.id).unwrap().is_none());
    }

    #[test]
    fn list_accounts_returns_all() {
        let (store, _dir) = create_test_store();

        sample_account(&store, 100);
        sample_account(&store, 200);

        let accounts = store.list_accounts().unwrap();
        assert_eq!(accounts.len(), 2);
    }

    #[test]
    fn update_missing_account_fails() {
        let (store, _dir) = create_test_store();

        let result = store.update_account(&AccountId::generate(), AccountUpdate::default());
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn delete_missing_account_fails() {
        let (store, _dir) = create_test_store();

        let result = store.delete_account(&AccountId::generate());
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn withdraw_decrements_balance_and_increments_counter() {
        let (store, _dir) = create_test_store();
        let account = sample_account(&store, 500);

        let after = store.withdraw(&account.id, 100).unwrap();
        assert_eq!(after.balance, 400);
        assert_eq!(after.transaction_counter, 1);

        // The stored record matches what was returned
        let reread = store.get_account(&account.id).unwrap().unwrap();
        assert_eq!(reread.balance, 400);
        assert_eq!(reread.transaction_counter, 1);
    }

    #[test]
    fn withdraw_insufficient_funds_leaves_account_untouched() {
        let (store, _dir) = create_test_store();
        let account = sample_account(&store, 50);

        let result = store.withdraw(&account.id, 100);
        assert!(matches!(
            result,
            Err(StoreError::InsufficientFunds {
                balance: 50,
                requested: 100
            })
        ));

        let reread = store.get_account(&account.id).unwrap().unwrap();
        assert_eq!(reread.balance, 50);
        assert_eq!(reread.transaction_counter, 0);
    }

    #[test]
    fn withdraw_missing_account_creates_nothing() {
        let (store, _dir) = create_test_store();

        let result = store.withdraw(&AccountId::generate(), 100);
        assert!(matches!(result, Err(StoreError::NotFound)));
        assert!(store.list_accounts().unwrap().is_empty());
    }

    #[test]
    fn non_positive_amounts_rejected() {
        let (store, _dir) = create_test_store();
        let account = sample_account(&store, 500);

        assert!(matches!(
            store.withdraw(&account.id, 0),
            Err(StoreError::InvalidAmount(0))
        ));
        assert!(matches!(
            store.deposit(&account.id, -5),
            Err(StoreError::InvalidAmount(-5))
        ));
    }

    #[test]
    fn deposit_increases_balance_and_increments_counter() {
        let (store, _dir) = create_test_store();
        let account = sample_account(&store, 500);

        let after = store.deposit(&account.id, 250).unwrap();
        assert_eq!(after.balance, 750);
        assert_eq!(after.transaction_counter, 1);
    }

    /// A document shape from before the counter field existed.
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct LegacyDoc {
        id: AccountId,
        owner_name: String,
        account_number: i64,
        balance: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    fn put_legacy_doc(store: &RocksStore) -> AccountId {
        let id = AccountId::generate();
        let now = Utc::now();
        let doc = LegacyDoc {
            id,
            owner_name: "Legacy".into(),
            account_number: 99,
            balance: 1000,
            created_at: now,
            updated_at: now,
        };

        let value = RocksStore::serialize(&doc).unwrap();
        let cf = store.cf(cf::ACCOUNTS).unwrap();
        store.db.put_cf(&cf, keys::account_key(&id), value).unwrap();

        id
    }

    #[test]
    fn backfill_sets_missing_counters() {
        let (store, _dir) = create_test_store();

        let legacy_id = put_legacy_doc(&store);
        sample_account(&store, 500); // already has the field

        let backfilled = store.backfill_counters().unwrap();
        assert_eq!(backfilled, 1);

        let legacy = store.get_account(&legacy_id).unwrap().unwrap();
        assert_eq!(legacy.transaction_counter, 0);
        assert_eq!(legacy.balance, 1000);

        // The rewritten document now carries the field explicitly
        let cf = store.cf(cf::ACCOUNTS).unwrap();
        let raw = store
            .db
            .get_cf(&cf, keys::account_key(&legacy_id))
            .unwrap()
            .unwrap();
        let probe: CounterProbe = RocksStore::deserialize(&raw).unwrap();
        assert_eq!(probe.transaction_counter, Some(0));
    }

    #[test]
    fn backfill_is_idempotent() {
        let (store, _dir) = create_test_store();

        put_legacy_doc(&store);

        assert_eq!(store.backfill_counters().unwrap(), 1);
        assert_eq!(store.backfill_counters().unwrap(), 0);
    }

    #[test]
    fn legacy_doc_decodes_with_zero_counter() {
        let (store, _dir) = create_test_store();

        let legacy_id = put_legacy_doc(&store);

        let account = store.get_account(&legacy_id).unwrap().unwrap();
        assert_eq!(account.transaction_counter, 0);
    }
}
