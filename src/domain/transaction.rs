use serde::{Deserialize, Serialize};

use super::{AccountNumber, Amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    #[serde(alias = "account opening")]
    AccountOpening,
    Deposit,
    Withdrawal,
    #[serde(alias = "fundtransfer")]
    FundTransfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::AccountOpening => "account-opening",
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::FundTransfer => "fund-transfer",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One balance-affecting event in the transaction log.
/// The amount is signed: inflows are positive, outflows negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub account_number: AccountNumber,
    pub transaction_type: TransactionType,
    pub amount: Amount,
}

impl Transaction {
    pub fn account_opening(account_number: impl Into<AccountNumber>, amount: Amount) -> Self {
        Self::record(account_number, TransactionType::AccountOpening, amount)
    }

    pub fn deposit(account_number: impl Into<AccountNumber>, amount: Amount) -> Self {
        Self::record(account_number, TransactionType::Deposit, amount)
    }

    /// `amount` is the withdrawn quantity; the record stores it negated.
    pub fn withdrawal(account_number: impl Into<AccountNumber>, amount: Amount) -> Self {
        Self::record(account_number, TransactionType::Withdrawal, -amount)
    }

    /// Build the balanced pair for a transfer: outflow on the source, inflow on the destination.
    pub fn transfer_pair(
        from: impl Into<AccountNumber>,
        to: impl Into<AccountNumber>,
        amount: Amount,
    ) -> [Self; 2] {
        [
            Self::record(from, TransactionType::FundTransfer, -amount),
            Self::record(to, TransactionType::FundTransfer, amount),
        ]
    }

    fn record(
        account_number: impl Into<AccountNumber>,
        transaction_type: TransactionType,
        amount: Amount,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            transaction_type,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdrawal_is_recorded_as_outflow() {
        let tx = Transaction::withdrawal("1", 5000);
        assert_eq!(tx.amount, -5000);
        assert_eq!(tx.transaction_type, TransactionType::Withdrawal);
    }

    #[test]
    fn test_transfer_pair_is_balanced() {
        let [out, inflow] = Transaction::transfer_pair("1", "2", 5000);

        assert_eq!(out.account_number, "1");
        assert_eq!(out.amount, -5000);
        assert_eq!(inflow.account_number, "2");
        assert_eq!(inflow.amount, 5000);
        assert_eq!(out.amount + inflow.amount, 0);
        assert_eq!(out.transaction_type, TransactionType::FundTransfer);
    }

    #[test]
    fn test_transaction_type_accepts_legacy_names() {
        let parsed: TransactionType = serde_json::from_str("\"account opening\"").unwrap();
        assert_eq!(parsed, TransactionType::AccountOpening);
        let parsed: TransactionType = serde_json::from_str("\"fundtransfer\"").unwrap();
        assert_eq!(parsed, TransactionType::FundTransfer);
    }

    #[test]
    fn test_transaction_serializes_camel_case() {
        let tx = Transaction::account_opening("3", 50000);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "accountNumber": "3",
                "transactionType": "account-opening",
                "amount": 50000
            })
        );
    }
}
