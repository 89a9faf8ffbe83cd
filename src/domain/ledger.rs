use super::{
    Account, AccountNumber, Amount, LedgerError, Role, Transaction, next_account_number,
};

/// Accounts in creation order; the source of truth for balances.
pub type Ledger = Vec<Account>;

/// Append-only record of every successful balance-affecting event.
pub type TransactionLog = Vec<Transaction>;

/// Resulting balances of a fund transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferBalances {
    pub from_balance: Amount,
    pub to_balance: Amount,
}

fn require_customer(role: Role, operation: &'static str) -> Result<(), LedgerError> {
    match role {
        Role::Customer => Ok(()),
        Role::BankManager => Err(LedgerError::RoleNotPermitted { role, operation }),
    }
}

fn require_positive(amount: Amount) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    Ok(())
}

fn position_of(accounts: &[Account], account_number: &str) -> Result<usize, LedgerError> {
    accounts
        .iter()
        .position(|a| a.account_number == account_number)
        .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
}

fn require_funds(account: &Account, amount: Amount) -> Result<(), LedgerError> {
    if account.balance < amount {
        return Err(LedgerError::InsufficientFunds {
            account_number: account.account_number.clone(),
            balance: account.balance,
            required: amount,
        });
    }
    Ok(())
}

/// Find an account by exact account number.
pub fn find_account<'a>(accounts: &'a [Account], account_number: &str) -> Option<&'a Account> {
    accounts.iter().find(|a| a.account_number == account_number)
}

/// Open a new account funded by `initial_deposit`.
/// The number allocated is one past the highest numeric account number.
pub fn create_account(
    ledger: &mut Ledger,
    log: &mut TransactionLog,
    full_name: &str,
    initial_deposit: Amount,
    role: Role,
) -> Result<AccountNumber, LedgerError> {
    require_customer(role, "account creation")?;
    require_positive(initial_deposit)?;

    // Strictly above every numeric number, so never already taken
    let account_number = next_account_number(ledger).ok_or(LedgerError::AccountNumberExhausted)?;

    ledger.push(Account::new(account_number.clone(), full_name, initial_deposit));
    log.push(Transaction::account_opening(account_number.clone(), initial_deposit));

    Ok(account_number)
}

/// Current balance of an account.
///
/// The role is accepted but not checked: any caller may read any balance.
pub fn account_balance(
    accounts: &[Account],
    account_number: &str,
    _role: Role,
) -> Result<Amount, LedgerError> {
    find_account(accounts, account_number)
        .map(|a| a.balance)
        .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
}

/// Credit `amount` to an account. Returns the new balance.
pub fn deposit(
    accounts: &mut [Account],
    log: &mut TransactionLog,
    account_number: &str,
    amount: Amount,
    role: Role,
) -> Result<Amount, LedgerError> {
    require_customer(role, "deposit")?;
    require_positive(amount)?;
    let idx = position_of(accounts, account_number)?;

    let account = &mut accounts[idx];
    let new_balance = account
        .balance
        .checked_add(amount)
        .ok_or_else(|| LedgerError::BalanceOverflow(account.account_number.clone()))?;

    account.balance = new_balance;
    log.push(Transaction::deposit(account_number, amount));

    Ok(new_balance)
}

/// Debit `amount` from an account. Returns the new balance.
pub fn withdraw(
    accounts: &mut [Account],
    log: &mut TransactionLog,
    account_number: &str,
    amount: Amount,
    role: Role,
) -> Result<Amount, LedgerError> {
    require_customer(role, "withdrawal")?;
    require_positive(amount)?;
    let idx = position_of(accounts, account_number)?;

    let account = &mut accounts[idx];
    require_funds(account, amount)?;

    account.balance -= amount;
    log.push(Transaction::withdrawal(account_number, amount));

    Ok(account.balance)
}

/// Move `amount` between two accounts, all or nothing.
///
/// Only the source balance is constrained. A transfer from an account to
/// itself leaves the balance unchanged but still records the pair.
pub fn transfer_funds(
    accounts: &mut [Account],
    log: &mut TransactionLog,
    from_account: &str,
    to_account: &str,
    amount: Amount,
    role: Role,
) -> Result<TransferBalances, LedgerError> {
    require_customer(role, "fund transfer")?;
    require_positive(amount)?;
    let from_idx = position_of(accounts, from_account)?;
    let to_idx = position_of(accounts, to_account)?;
    require_funds(&accounts[from_idx], amount)?;

    if from_idx != to_idx {
        let to_balance = accounts[to_idx]
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(to_account.to_string()))?;
        accounts[from_idx].balance -= amount;
        accounts[to_idx].balance = to_balance;
    }
    log.extend(Transaction::transfer_pair(from_account, to_account, amount));

    Ok(TransferBalances {
        from_balance: accounts[from_idx].balance,
        to_balance: accounts[to_idx].balance,
    })
}

/// Sum of every account balance. Restricted to bank managers.
///
/// Takes no transaction log on purpose: the total comes from balances alone,
/// and the log's own sum is reported by `check_integrity`.
pub fn total_bank_balance(accounts: &[Account], role: Role) -> Result<Amount, LedgerError> {
    match role {
        Role::BankManager => {}
        Role::Customer => {
            return Err(LedgerError::RoleNotPermitted {
                role,
                operation: "total bank balance",
            });
        }
    }

    accounts
        .iter()
        .try_fold(0 as Amount, |total, a| total.checked_add(a.balance))
        .ok_or(LedgerError::TotalOverflow)
}
