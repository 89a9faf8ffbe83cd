use std::fmt::Debug;

use tracing::{debug, info, warn};

use crate::domain::{
    self, Account, Amount, IntegrityReport, Ledger, LedgerError, Role, Transaction, TransactionLog,
};

use super::{
    ACCOUNT_CREATION_FAILED, FundTransferStatus, Operation, OperationOutcome, TransactionStatus,
};

/// Session over a caller-owned ledger and transaction log.
///
/// The service borrows both collections for its lifetime and never creates
/// or drops them. Every refused operation leaves them untouched; the reason is
/// logged and the caller sees only the collapsed `failed` status.
pub struct BankService<'a> {
    ledger: &'a mut Ledger,
    log: &'a mut TransactionLog,
}

fn trace_outcome<T: Debug>(operation: &str, role: Role, result: &Result<T, LedgerError>) {
    match result {
        Ok(value) => info!(operation, %role, result = ?value, "operation succeeded"),
        Err(err) => warn!(operation, %role, error = %err, "operation refused"),
    }
}

impl<'a> BankService<'a> {
    pub fn new(ledger: &'a mut Ledger, log: &'a mut TransactionLog) -> Self {
        Self { ledger, log }
    }

    pub fn accounts(&self) -> &[Account] {
        self.ledger.as_slice()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.log.as_slice()
    }

    /// Open an account. Returns the new account number, or `"failed"`.
    pub fn create_user_account(
        &mut self,
        full_name: &str,
        initial_deposit: Amount,
        role: Role,
    ) -> String {
        let result = domain::create_account(self.ledger, self.log, full_name, initial_deposit, role);
        trace_outcome("open", role, &result);
        result.unwrap_or_else(|_| ACCOUNT_CREATION_FAILED.to_string())
    }

    pub fn get_account_balance(&self, account_number: &str, role: Role) -> TransactionStatus {
        let result = domain::account_balance(self.accounts(), account_number, role);
        trace_outcome("balance", role, &result);
        result.into()
    }

    pub fn deposit(&mut self, account_number: &str, amount: Amount, role: Role) -> TransactionStatus {
        let result = domain::deposit(self.ledger, self.log, account_number, amount, role);
        trace_outcome("deposit", role, &result);
        result.into()
    }

    pub fn withdrawal(
        &mut self,
        account_number: &str,
        amount: Amount,
        role: Role,
    ) -> TransactionStatus {
        let result = domain::withdraw(self.ledger, self.log, account_number, amount, role);
        trace_outcome("withdraw", role, &result);
        result.into()
    }

    pub fn transfer_fund(
        &mut self,
        from_account: &str,
        to_account: &str,
        amount: Amount,
        role: Role,
    ) -> FundTransferStatus {
        let result =
            domain::transfer_funds(self.ledger, self.log, from_account, to_account, amount, role);
        trace_outcome("transfer", role, &result);
        result.into()
    }

    /// Bank-wide balance report, for bank managers only.
    pub fn get_total_bank_balance(&self, role: Role) -> TransactionStatus {
        let result = domain::total_bank_balance(self.accounts(), role);
        trace_outcome("total", role, &result);
        result.into()
    }

    pub fn check_integrity(&self) -> IntegrityReport {
        let report = domain::check_integrity(self.accounts(), self.transactions());
        if !report.is_healthy() {
            warn!(issues = report.issues.len(), "ledger integrity issues found");
        }
        report
    }

    /// Dispatch an operation to the matching entry point.
    pub fn apply(&mut self, operation: &Operation) -> OperationOutcome {
        debug!(operation = operation.name(), role = %operation.role(), "applying operation");
        match operation {
            Operation::OpenAccount {
                full_name,
                initial_deposit,
                role,
            } => OperationOutcome::AccountNumber(self.create_user_account(
                full_name,
                *initial_deposit,
                *role,
            )),
            Operation::Balance {
                account_number,
                role,
            } => OperationOutcome::Status(self.get_account_balance(account_number, *role)),
            Operation::Deposit {
                account_number,
                amount,
                role,
            } => OperationOutcome::Status(self.deposit(account_number, *amount, *role)),
            Operation::Withdraw {
                account_number,
                amount,
                role,
            } => OperationOutcome::Status(self.withdrawal(account_number, *amount, *role)),
            Operation::Transfer {
                from_account,
                to_account,
                amount,
                role,
            } => OperationOutcome::Transfer(self.transfer_fund(
                from_account,
                to_account,
                *amount,
                *role,
            )),
            Operation::TotalBalance { role } => {
                OperationOutcome::Status(self.get_total_bank_balance(*role))
            }
        }
    }
}
