use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, Write, stdout};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::application::{BankService, Operation};
use crate::domain::{Amount, Ledger, Role, TransactionLog, parse_amount};
use crate::io::{Exporter, load_snapshot, read_script, run_script};

/// bankledger - in-memory banking ledger
#[derive(Parser, Debug)]
#[command(name = "bankledger")]
#[command(about = "Run banking operations against an in-memory ledger")]
#[command(version)]
pub struct Cli {
    /// Snapshot to start from (JSON, as written by `dump full`); empty ledger if omitted
    #[arg(short, long, global = true)]
    pub seed: Option<PathBuf>,

    /// Write the resulting snapshot to this file when the command finishes
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a new account
    Open {
        /// Account holder's full name
        name: String,

        /// Initial deposit (e.g., "500" or "500.00")
        #[arg(short, long)]
        deposit: String,

        /// Caller role: customer, bank-manager
        #[arg(short, long, default_value = "customer")]
        role: String,
    },

    /// Show the balance of an account
    Balance {
        /// Account number
        account: String,

        /// Caller role: customer, bank-manager
        #[arg(short, long, default_value = "customer")]
        role: String,
    },

    /// Deposit into an account
    Deposit {
        /// Account number
        account: String,

        /// Amount to deposit
        amount: String,

        /// Caller role: customer, bank-manager
        #[arg(short, long, default_value = "customer")]
        role: String,
    },

    /// Withdraw from an account
    Withdraw {
        /// Account number
        account: String,

        /// Amount to withdraw
        amount: String,

        /// Caller role: customer, bank-manager
        #[arg(short, long, default_value = "customer")]
        role: String,
    },

    /// Transfer funds between accounts
    Transfer {
        /// Amount to transfer
        amount: String,

        /// Source account number
        #[arg(long)]
        from: String,

        /// Destination account number
        #[arg(long)]
        to: String,

        /// Caller role: customer, bank-manager
        #[arg(short, long, default_value = "customer")]
        role: String,
    },

    /// Report the total balance held by the bank
    Total {
        /// Caller role: customer, bank-manager
        #[arg(short, long, default_value = "bank-manager")]
        role: String,
    },

    /// Run a CSV script of operations (operation,role,account,to_account,amount,name)
    Run {
        /// Script file
        script: PathBuf,
    },

    /// Verify that balances agree with the transaction log
    Check,

    /// Export accounts, transactions, or a full snapshot
    #[command(name = "dump")]
    Dump {
        /// What to export: accounts, transactions, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Install the global subscriber. Logs go to stderr so command output stays parseable.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call finds the first subscriber installed; keep it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn parse_role(role: &str) -> Result<Role> {
    Role::from_str(role).with_context(|| {
        format!(
            "Invalid role '{}'. Valid roles: customer, bank-manager",
            role
        )
    })
}

fn amount_arg(amount: &str) -> Result<Amount> {
    parse_amount(amount)
        .with_context(|| format!("Invalid amount '{}'. Use a whole number such as '500'", amount))
}

fn load_seed(path: Option<&Path>) -> Result<(Ledger, TransactionLog)> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open seed file: {}", path.display()))?;
            let snapshot = load_snapshot(BufReader::new(file))
                .with_context(|| format!("Failed to load seed file: {}", path.display()))?;
            info!(
                accounts = snapshot.accounts.len(),
                transactions = snapshot.transactions.len(),
                "seed loaded"
            );
            Ok(snapshot.into_parts())
        }
        None => Ok((Ledger::new(), TransactionLog::new())),
    }
}

impl Commands {
    /// The single operation this command performs, if it is one.
    fn operation(&self) -> Result<Option<Operation>> {
        let operation = match self {
            Commands::Open {
                name,
                deposit,
                role,
            } => Operation::OpenAccount {
                full_name: name.clone(),
                initial_deposit: amount_arg(deposit)?,
                role: parse_role(role)?,
            },
            Commands::Balance { account, role } => Operation::Balance {
                account_number: account.clone(),
                role: parse_role(role)?,
            },
            Commands::Deposit {
                account,
                amount,
                role,
            } => Operation::Deposit {
                account_number: account.clone(),
                amount: amount_arg(amount)?,
                role: parse_role(role)?,
            },
            Commands::Withdraw {
                account,
                amount,
                role,
            } => Operation::Withdraw {
                account_number: account.clone(),
                amount: amount_arg(amount)?,
                role: parse_role(role)?,
            },
            Commands::Transfer {
                amount,
                from,
                to,
                role,
            } => Operation::Transfer {
                from_account: from.clone(),
                to_account: to.clone(),
                amount: amount_arg(amount)?,
                role: parse_role(role)?,
            },
            Commands::Total { role } => Operation::TotalBalance {
                role: parse_role(role)?,
            },
            Commands::Run { .. } | Commands::Check | Commands::Dump { .. } => return Ok(None),
        };
        Ok(Some(operation))
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_logging(self.verbose);
        let mut out = stdout().lock();
        self.execute(&mut out)
    }

    /// Run the command, writing its output to `out`.
    pub fn execute<W: Write>(self, out: &mut W) -> Result<()> {
        let (mut ledger, mut log) = load_seed(self.seed.as_deref())?;
        let mut service = BankService::new(&mut ledger, &mut log);

        match &self.command {
            Commands::Run { script } => run_script_command(&mut service, script, out)?,
            Commands::Check => run_check_command(&service, out)?,
            Commands::Dump {
                export_type,
                output,
            } => run_dump_command(&service, export_type, output.as_deref(), out)?,
            command => {
                if let Some(operation) = command.operation()? {
                    let outcome = service.apply(&operation);
                    writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
                }
            }
        }

        if let Some(path) = &self.export {
            let file = File::create(path)
                .with_context(|| format!("Failed to create export file: {}", path.display()))?;
            Exporter::new(service.accounts(), service.transactions()).export_full_json(file)?;
            debug!(path = %path.display(), "snapshot exported");
        }

        Ok(())
    }
}

fn run_script_command<W: Write>(
    service: &mut BankService<'_>,
    path: &Path,
    out: &mut W,
) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open script: {}", path.display()))?;
    let script = read_script(BufReader::new(file));

    if !script.errors.is_empty() {
        eprintln!("Script has {} invalid line(s):", script.errors.len());
        for error in script.errors.iter().take(10) {
            eprintln!("  {}", error);
        }
        if script.errors.len() > 10 {
            eprintln!("  ... and {} more", script.errors.len() - 10);
        }
        anyhow::bail!("Refusing to run invalid script: {}", path.display());
    }

    let steps = run_script(service, &script);
    let succeeded = steps.iter().filter(|s| s.result.is_success()).count();
    for step in &steps {
        writeln!(out, "{}", serde_json::to_string(step)?)?;
    }
    info!(
        steps = steps.len(),
        succeeded,
        failed = steps.len() - succeeded,
        "script finished"
    );

    Ok(())
}

fn run_check_command<W: Write>(service: &BankService<'_>, out: &mut W) -> Result<()> {
    let report = service.check_integrity();

    writeln!(out, "Accounts:     {}", report.account_count)?;
    writeln!(out, "Transactions: {}", report.transaction_count)?;
    writeln!(out)?;
    writeln!(
        out,
        "  {:<14} {:>14}",
        "Ledger total:",
        report.ledger_total
    )?;
    writeln!(
        out,
        "  {:<14} {:>14}  {}",
        "Log total:",
        report.transaction_total,
        if report.is_balanced() { "OK" } else { "MISMATCH!" }
    )?;
    writeln!(out)?;

    if report.is_healthy() {
        writeln!(out, "Ledger is consistent.")?;
    } else {
        writeln!(out, "Issues found:")?;
        for issue in &report.issues {
            writeln!(out, "  - {}", issue)?;
        }
        anyhow::bail!("Ledger integrity check failed");
    }

    Ok(())
}

fn run_dump_command<W: Write>(
    service: &BankService<'_>,
    export_type: &str,
    output: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let exporter = Exporter::new(service.accounts(), service.transactions());

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let summary = dump(&exporter, export_type, file)?;
            eprintln!("Exported {}", summary);
        }
        None => {
            dump(&exporter, export_type, out)?;
        }
    }

    Ok(())
}

fn dump<W: Write>(exporter: &Exporter<'_>, export_type: &str, writer: W) -> Result<String> {
    match export_type {
        "accounts" => {
            let count = exporter.export_accounts_csv(writer)?;
            Ok(format!("{} accounts", count))
        }
        "transactions" => {
            let count = exporter.export_transactions_csv(writer)?;
            Ok(format!("{} transactions", count))
        }
        "full" => {
            let snapshot = exporter.export_full_json(writer)?;
            Ok(format!(
                "snapshot: {} accounts, {} transactions",
                snapshot.accounts.len(),
                snapshot.transactions.len()
            ))
        }
        _ => anyhow::bail!(
            "Invalid export type '{}'. Valid types: accounts, transactions, full",
            export_type
        ),
    }
}
