use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::{Account, Ledger, Transaction, TransactionLog};

/// Full copy of a ledger and its transaction log.
/// Hand-written seed files may omit `version` and `exportedAt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub accounts: Ledger,
    #[serde(default)]
    pub transactions: TransactionLog,
}

impl LedgerSnapshot {
    pub fn capture(accounts: &[Account], transactions: &[Transaction]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Some(Utc::now()),
            accounts: accounts.to_vec(),
            transactions: transactions.to_vec(),
        }
    }

    /// Split the snapshot into the two collections operations work on.
    pub fn into_parts(self) -> (Ledger, TransactionLog) {
        (self.accounts, self.transactions)
    }
}

/// Writes ledger contents out as CSV or JSON.
pub struct Exporter<'a> {
    accounts: &'a [Account],
    transactions: &'a [Transaction],
}

impl<'a> Exporter<'a> {
    pub fn new(accounts: &'a [Account], transactions: &'a [Transaction]) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    /// Export accounts to CSV format
    pub fn export_accounts_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["account_number", "account_name", "balance"])?;

        for account in self.accounts {
            let balance = account.balance.to_string();
            csv_writer.write_record([
                account.account_number.as_str(),
                account.account_name.as_str(),
                balance.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(self.accounts.len())
    }

    /// Export the transaction log to CSV format, in log order
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["sequence", "account_number", "transaction_type", "amount"])?;

        for (idx, tx) in self.transactions.iter().enumerate() {
            let sequence = (idx + 1).to_string();
            let amount = tx.amount.to_string();
            csv_writer.write_record([
                sequence.as_str(),
                tx.account_number.as_str(),
                tx.transaction_type.as_str(),
                amount.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(self.transactions.len())
    }

    /// Export everything as a JSON snapshot
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot::capture(self.accounts, self.transactions);

        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}
