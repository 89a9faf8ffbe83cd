use serde::Serialize;

use crate::domain::{AccountNumber, Amount, Role};

use super::{FundTransferStatus, TransactionStatus};

/// A single ledger operation, as read from a script or the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    OpenAccount {
        full_name: String,
        initial_deposit: Amount,
        role: Role,
    },
    Balance {
        account_number: AccountNumber,
        role: Role,
    },
    Deposit {
        account_number: AccountNumber,
        amount: Amount,
        role: Role,
    },
    Withdraw {
        account_number: AccountNumber,
        amount: Amount,
        role: Role,
    },
    Transfer {
        from_account: AccountNumber,
        to_account: AccountNumber,
        amount: Amount,
        role: Role,
    },
    TotalBalance {
        role: Role,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::OpenAccount { .. } => "open",
            Operation::Balance { .. } => "balance",
            Operation::Deposit { .. } => "deposit",
            Operation::Withdraw { .. } => "withdraw",
            Operation::Transfer { .. } => "transfer",
            Operation::TotalBalance { .. } => "total",
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Operation::OpenAccount { role, .. }
            | Operation::Balance { role, .. }
            | Operation::Deposit { role, .. }
            | Operation::Withdraw { role, .. }
            | Operation::Transfer { role, .. }
            | Operation::TotalBalance { role } => *role,
        }
    }
}

/// The externally visible result of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutcome {
    /// New account number, or `"failed"`
    AccountNumber(String),
    Status(TransactionStatus),
    Transfer(FundTransferStatus),
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            OperationOutcome::AccountNumber(number) => number != super::ACCOUNT_CREATION_FAILED,
            OperationOutcome::Status(status) => status.is_success(),
            OperationOutcome::Transfer(status) => status.is_success(),
        }
    }
}
