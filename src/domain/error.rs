use thiserror::Error;

use super::{AccountNumber, Amount, Role};

/// Why a ledger operation was refused. Every variant leaves both the
/// ledger and the transaction log untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Amount),

    #[error("Insufficient funds in account {account_number}: balance {balance}, required {required}")]
    InsufficientFunds {
        account_number: AccountNumber,
        balance: Amount,
        required: Amount,
    },

    #[error("Role {role} may not perform {operation}")]
    RoleNotPermitted {
        role: Role,
        operation: &'static str,
    },

    #[error("No account numbers left to allocate")]
    AccountNumberExhausted,

    #[error("Balance of account {0} would overflow")]
    BalanceOverflow(AccountNumber),

    #[error("Total bank balance does not fit in the amount range")]
    TotalOverflow,
}
