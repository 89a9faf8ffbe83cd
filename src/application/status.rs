use serde::{Deserialize, Serialize};

use crate::domain::{Amount, LedgerError, TransferBalances};

/// Returned in place of an account number when account creation is refused.
pub const ACCOUNT_CREATION_FAILED: &str = "failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

/// Result record for balance inquiries, deposits, withdrawals and the bank total.
/// Serializes as `{"status":"success","balance":2000}` or `{"status":"failed"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Amount>,
}

impl TransactionStatus {
    pub fn success(balance: Amount) -> Self {
        Self {
            status: Status::Success,
            balance: Some(balance),
        }
    }

    pub fn failed() -> Self {
        Self {
            status: Status::Failed,
            balance: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<Result<Amount, LedgerError>> for TransactionStatus {
    fn from(result: Result<Amount, LedgerError>) -> Self {
        match result {
            Ok(balance) => Self::success(balance),
            Err(_) => Self::failed(),
        }
    }
}

/// Result record for fund transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferStatus {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_balance: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_balance: Option<Amount>,
}

impl FundTransferStatus {
    pub fn success(from_balance: Amount, to_balance: Amount) -> Self {
        Self {
            status: Status::Success,
            from_balance: Some(from_balance),
            to_balance: Some(to_balance),
        }
    }

    pub fn failed() -> Self {
        Self {
            status: Status::Failed,
            from_balance: None,
            to_balance: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<Result<TransferBalances, LedgerError>> for FundTransferStatus {
    fn from(result: Result<TransferBalances, LedgerError>) -> Self {
        match result {
            Ok(b) => Self::success(b.from_balance, b.to_balance),
            Err(_) => Self::failed(),
        }
    }
}
