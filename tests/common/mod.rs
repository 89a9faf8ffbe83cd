// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use bankledger::domain::{Account, Ledger, Transaction, TransactionLog};
use bankledger::io::LedgerSnapshot;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture: two customers with opening deposits already logged
pub struct StandardBank;

impl StandardBank {
    /// Account 1 holds 100, account 2 holds 1500
    pub fn ledger() -> (Ledger, TransactionLog) {
        let ledger = vec![
            Account::new("1", "John Doe", 100),
            Account::new("2", "Elton John", 1500),
        ];
        let log = vec![Transaction::deposit("1", 100), Transaction::deposit("2", 1500)];
        (ledger, log)
    }

    /// Write the standard ledger as a seed snapshot in a temporary directory
    pub fn seed_file() -> Result<(PathBuf, TempDir)> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("seed.json");
        let (ledger, log) = Self::ledger();
        let snapshot = LedgerSnapshot::capture(&ledger, &log);
        std::fs::write(&path, serde_json::to_string_pretty(&snapshot)?)?;
        Ok((path, temp_dir))
    }
}

/// Sum of every balance in the ledger
pub fn ledger_total(ledger: &[Account]) -> i64 {
    ledger.iter().map(|a| a.balance).sum()
}
