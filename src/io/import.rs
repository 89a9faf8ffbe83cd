use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

use crate::application::{BankService, Operation, OperationOutcome};
use crate::domain::{Amount, Role, parse_amount};
use crate::io::export::LedgerSnapshot;

/// Load a snapshot and make sure it satisfies the ledger invariants
/// operations rely on.
pub fn load_snapshot<R: Read>(reader: R) -> Result<LedgerSnapshot> {
    let snapshot: LedgerSnapshot =
        serde_json::from_reader(reader).context("Snapshot is not valid JSON")?;

    let mut seen = HashSet::new();
    for account in &snapshot.accounts {
        if !seen.insert(account.account_number.as_str()) {
            anyhow::bail!(
                "Snapshot contains account number {} more than once",
                account.account_number
            );
        }
    }

    Ok(snapshot)
}

/// Error found while reading a script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "line {}, field '{}': {}", self.line, field, self.error),
            None => write!(f, "line {}: {}", self.line, self.error),
        }
    }
}

/// An operation together with the script line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub operation: Operation,
}

/// Parsed script: valid operations in order, plus every rejected line
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub lines: Vec<ScriptLine>,
    pub errors: Vec<ScriptError>,
}

/// One executed script line
#[derive(Debug, Clone, Serialize)]
pub struct ScriptStep {
    pub line: usize,
    pub operation: &'static str,
    pub result: OperationOutcome,
}

#[derive(Debug, Deserialize)]
struct ScriptRecord {
    operation: String,
    role: String,
    #[serde(default)]
    account: Option<String>,
    #[serde(default)]
    to_account: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

fn field_error(line: usize, field: &str, error: impl Into<String>) -> ScriptError {
    ScriptError {
        line,
        field: Some(field.to_string()),
        error: error.into(),
    }
}

fn required<'r>(
    line: usize,
    field: &str,
    value: &'r Option<String>,
) -> std::result::Result<&'r str, ScriptError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(field_error(line, field, "missing value")),
    }
}

fn amount(line: usize, value: &Option<String>) -> std::result::Result<Amount, ScriptError> {
    let raw = required(line, "amount", value)?;
    parse_amount(raw).map_err(|e| field_error(line, "amount", e.to_string()))
}

impl ScriptRecord {
    fn into_operation(self, line: usize) -> std::result::Result<Operation, ScriptError> {
        let role = Role::from_str(&self.role)
            .ok_or_else(|| field_error(line, "role", format!("unknown role '{}'", self.role)))?;

        let operation = match self.operation.trim().to_lowercase().as_str() {
            "open" => Operation::OpenAccount {
                full_name: required(line, "name", &self.name)?.to_string(),
                initial_deposit: amount(line, &self.amount)?,
                role,
            },
            "balance" => Operation::Balance {
                account_number: required(line, "account", &self.account)?.to_string(),
                role,
            },
            "deposit" => Operation::Deposit {
                account_number: required(line, "account", &self.account)?.to_string(),
                amount: amount(line, &self.amount)?,
                role,
            },
            "withdraw" | "withdrawal" => Operation::Withdraw {
                account_number: required(line, "account", &self.account)?.to_string(),
                amount: amount(line, &self.amount)?,
                role,
            },
            "transfer" => Operation::Transfer {
                from_account: required(line, "account", &self.account)?.to_string(),
                to_account: required(line, "to_account", &self.to_account)?.to_string(),
                amount: amount(line, &self.amount)?,
                role,
            },
            "total" => Operation::TotalBalance { role },
            other => {
                return Err(field_error(
                    line,
                    "operation",
                    format!("unknown operation '{}'", other),
                ));
            }
        };

        Ok(operation)
    }
}

/// Read an operation script from CSV.
///
/// Header: `operation,role,account,to_account,amount,name`. Amounts are
/// whole numbers in the same unit as ledger balances. Bad lines are
/// collected as errors and skipped.
pub fn read_script<R: Read>(reader: R) -> Script {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut script = Script::default();

    for (idx, result) in csv_reader.deserialize::<ScriptRecord>().enumerate() {
        let line = idx + 2; // header is line 1

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                script.errors.push(ScriptError {
                    line,
                    field: None,
                    error: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        match record.into_operation(line) {
            Ok(operation) => script.lines.push(ScriptLine { line, operation }),
            Err(e) => script.errors.push(e),
        }
    }

    script
}

/// Apply every script line in order.
pub fn run_script(service: &mut BankService<'_>, script: &Script) -> Vec<ScriptStep> {
    script
        .lines
        .iter()
        .map(|l| ScriptStep {
            line: l.line,
            operation: l.operation.name(),
            result: service.apply(&l.operation),
        })
        .collect()
}
