use serde::{Deserialize, Serialize};

use super::Amount;

/// Account numbers are numeric-looking strings ("1", "2", ...).
pub type AccountNumber = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: AccountNumber,
    pub account_name: String,
    pub balance: Amount,
}

impl Account {
    pub fn new(
        account_number: impl Into<AccountNumber>,
        account_name: impl Into<String>,
        balance: Amount,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            account_name: account_name.into(),
            balance,
        }
    }

    /// Numeric value of the account number, if it has one.
    pub fn numeric_number(&self) -> Option<u64> {
        self.account_number.trim().parse().ok()
    }
}

/// Allocate the number that follows the highest numeric account number.
/// Returns "1" for a ledger without numeric account numbers, `None` when
/// the next number would not fit.
pub fn next_account_number(accounts: &[Account]) -> Option<AccountNumber> {
    match accounts.iter().filter_map(Account::numeric_number).max() {
        Some(highest) => highest.checked_add(1).map(|n| n.to_string()),
        None => Some("1".to_string()),
    }
}
