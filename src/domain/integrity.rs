use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Account, AccountNumber, Amount, Transaction, TransactionType};

/// Consistency report over a ledger and its transaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub account_count: usize,
    pub transaction_count: usize,
    /// Sum of every account balance
    pub ledger_total: i128,
    /// Sum of every transaction amount
    pub transaction_total: i128,
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    /// True when the log accounts for every unit held in the ledger.
    pub fn is_balanced(&self) -> bool {
        self.ledger_total == self.transaction_total
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IntegrityIssue {
    DuplicateAccountNumber {
        account_number: AccountNumber,
    },
    BalanceMismatch {
        account_number: AccountNumber,
        balance: Amount,
        recorded: i128,
    },
    UnknownAccount {
        account_number: AccountNumber,
        records: usize,
    },
    UnbalancedTransfers {
        net: i128,
    },
    NegativeBalance {
        account_number: AccountNumber,
        balance: Amount,
    },
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityIssue::DuplicateAccountNumber { account_number } => {
                write!(f, "account number {} appears more than once", account_number)
            }
            IntegrityIssue::BalanceMismatch {
                account_number,
                balance,
                recorded,
            } => write!(
                f,
                "account {} holds {} but its transactions sum to {}",
                account_number, balance, recorded
            ),
            IntegrityIssue::UnknownAccount {
                account_number,
                records,
            } => write!(
                f,
                "{} transaction(s) reference unknown account {}",
                records, account_number
            ),
            IntegrityIssue::UnbalancedTransfers { net } => {
                write!(f, "fund transfers do not net to zero (net {})", net)
            }
            IntegrityIssue::NegativeBalance {
                account_number,
                balance,
            } => write!(f, "account {} has negative balance {}", account_number, balance),
        }
    }
}

/// Cross-check the ledger against the transaction log.
pub fn check_integrity(accounts: &[Account], log: &[Transaction]) -> IntegrityReport {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for account in accounts {
        if !seen.insert(account.account_number.as_str()) {
            issues.push(IntegrityIssue::DuplicateAccountNumber {
                account_number: account.account_number.clone(),
            });
        }
    }

    let mut recorded: HashMap<&str, (i128, usize)> = HashMap::new();
    let mut transfer_net: i128 = 0;
    for tx in log {
        let entry = recorded.entry(tx.account_number.as_str()).or_default();
        entry.0 += i128::from(tx.amount);
        entry.1 += 1;
        if tx.transaction_type == TransactionType::FundTransfer {
            transfer_net += i128::from(tx.amount);
        }
    }

    for account in accounts {
        let sum = recorded
            .get(account.account_number.as_str())
            .map(|(sum, _)| *sum)
            .unwrap_or(0);
        if sum != i128::from(account.balance) {
            issues.push(IntegrityIssue::BalanceMismatch {
                account_number: account.account_number.clone(),
                balance: account.balance,
                recorded: sum,
            });
        }
        if account.balance < 0 {
            issues.push(IntegrityIssue::NegativeBalance {
                account_number: account.account_number.clone(),
                balance: account.balance,
            });
        }
    }

    let mut unknown: Vec<_> = recorded
        .iter()
        .filter(|(number, _)| !seen.contains(*number))
        .map(|(number, (_, count))| IntegrityIssue::UnknownAccount {
            account_number: number.to_string(),
            records: *count,
        })
        .collect();
    unknown.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    issues.extend(unknown);

    if transfer_net != 0 {
        issues.push(IntegrityIssue::UnbalancedTransfers { net: transfer_net });
    }

    IntegrityReport {
        account_count: accounts.len(),
        transaction_count: log.len(),
        ledger_total: accounts.iter().map(|a| i128::from(a.balance)).sum(),
        transaction_total: log.iter().map(|t| i128::from(t.amount)).sum(),
        issues,
    }
}
