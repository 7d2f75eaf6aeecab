//! Account types for the cuentas service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// A bank account record.
///
/// All wire representations (API bodies and stored documents) use camelCase
/// field names; `transaction_counter` defaults to 0 so documents written
/// before the field existed still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Store-assigned identifier.
    pub id: AccountId,

    /// Name of the account owner.
    pub owner_name: String,

    /// Numeric account number.
    pub account_number: i64,

    /// Available funds in minor units.
    pub balance: i64,

    /// Number of completed deposit and withdraw operations.
    #[serde(default)]
    pub transaction_counter: u64,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account from caller-supplied fields.
    #[must_use]
    pub fn new(id: AccountId, data: NewAccount) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_name: data.owner_name,
            account_number: data.account_number,
            balance: data.balance,
            transaction_counter: data.transaction_counter.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account has sufficient funds for a withdrawal.
    #[must_use]
    pub fn has_sufficient_funds(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Apply a partial update and touch `updated_at`.
    ///
    /// The transaction counter is system-managed and cannot be patched here;
    /// only deposit and withdraw move it.
    pub fn apply_update(&mut self, update: AccountUpdate) {
        if let Some(owner_name) = update.owner_name {
            self.owner_name = owner_name;
        }
        if let Some(account_number) = update.account_number {
            self.account_number = account_number;
        }
        if let Some(balance) = update.balance {
            self.balance = balance;
        }
        self.updated_at = Utc::now();
    }
}

/// Caller-supplied fields for creating an account.
///
/// The id and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// Name of the account owner.
    pub owner_name: String,

    /// Numeric account number.
    pub account_number: i64,

    /// Opening balance in minor units.
    pub balance: i64,

    /// Initial transaction counter; defaults to 0 when absent.
    #[serde(default)]
    pub transaction_counter: Option<u64>,
}

/// A partial update to an account.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    /// New owner name, if changing.
    pub owner_name: Option<String>,

    /// New account number, if changing.
    pub account_number: Option<i64>,

    /// New balance, if changing.
    pub balance: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(balance: i64) -> Account {
        Account::new(
            AccountId::generate(),
            NewAccount {
                owner_name: "Ana".into(),
                account_number: 1001,
                balance,
                transaction_counter: None,
            },
        )
    }

    #[test]
    fn new_account_defaults_counter_to_zero() {
        let account = new_account(500);
        assert_eq!(account.transaction_counter, 0);
        assert_eq!(account.balance, 500);
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn new_account_honors_supplied_counter() {
        let account = Account::new(
            AccountId::generate(),
            NewAccount {
                owner_name: "Ana".into(),
                account_number: 1001,
                balance: 0,
                transaction_counter: Some(7),
            },
        );
        assert_eq!(account.transaction_counter, 7);
    }

    #[test]
    fn sufficient_funds() {
        let account = new_account(1000);
        assert!(account.has_sufficient_funds(500));
        assert!(account.has_sufficient_funds(1000));
        assert!(!account.has_sufficient_funds(1001));
    }

    #[test]
    fn apply_update_patches_only_present_fields() {
        let mut account = new_account(500);
        account.apply_update(AccountUpdate {
            balance: Some(900),
            ..AccountUpdate::default()
        });
        assert_eq!(account.balance, 900);
        assert_eq!(account.owner_name, "Ana");
        assert_eq!(account.account_number, 1001);
        assert!(account.updated_at >= account.created_at);
    }

    #[test]
    fn wire_format_is_camel_case() {
        let account = new_account(500);
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("ownerName").is_some());
        assert!(json.get("accountNumber").is_some());
        assert!(json.get("transactionCounter").is_some());
        assert!(json.get("owner_name").is_none());
    }

    #[test]
    fn missing_counter_decodes_as_zero() {
        let json = serde_json::json!({
            "id": AccountId::generate().to_string(),
            "ownerName": "Ana",
            "accountNumber": 1001,
            "balance": 500,
            "createdAt": Utc::now(),
            "updatedAt": Utc::now(),
        });
        let account: Account = serde_json::from_value(json).unwrap();
        assert_eq!(account.transaction_counter, 0);
    }
}
