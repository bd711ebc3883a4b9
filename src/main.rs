use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use finance_ledger::{export_csv, init_logging, write_csv, Ledger, NewTransaction, StorageArgs};

/// Finance Manager CLI
#[derive(Parser)]
#[command(name = "finance", version, about = "Finance Manager CLI")]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a transaction
    Add {
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        #[arg(long)]
        category: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// List transactions
    List,
    /// Show balance
    Balance,
    /// Summary by category
    Summary,
    /// Export transactions as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging("warn");

    let Some(cmd) = cli.cmd else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut ledger = cli
        .storage
        .open_ledger()
        .with_context(|| format!("Failed to open ledger at {}", cli.storage.data.display()))?;

    match cmd {
        Commands::Add {
            amount,
            category,
            description,
        } => cmd_add(&mut ledger, amount, category, description),
        Commands::List => cmd_list(&ledger),
        Commands::Balance => cmd_balance(&ledger),
        Commands::Summary => cmd_summary(&ledger),
        Commands::Export { out } => cmd_export(&ledger, out),
    }
}

fn cmd_add(ledger: &mut Ledger, amount: f64, category: String, description: String) -> Result<()> {
    let tx = NewTransaction::new(amount, category)
        .with_description(description)
        .into_transaction()?;

    ledger
        .add_transaction(tx.clone())
        .context("Failed to save transaction")?;

    println!("Added: {} [id {}]", tx, tx.id);
    Ok(())
}

fn cmd_list(ledger: &Ledger) -> Result<()> {
    for tx in ledger.list_transactions() {
        println!("{}", tx);
    }
    Ok(())
}

fn cmd_balance(ledger: &Ledger) -> Result<()> {
    println!("Balance: {:.2}", ledger.get_balance());
    Ok(())
}

fn cmd_summary(ledger: &Ledger) -> Result<()> {
    for (category, total) in ledger.summary_by_category().iter() {
        println!("{:<15} {:10.2}", category, total);
    }
    Ok(())
}

fn cmd_export(ledger: &Ledger, out: Option<PathBuf>) -> Result<()> {
    let transactions = ledger.list_transactions();

    match out {
        Some(path) => {
            let count = export_csv(&transactions, &path)?;
            eprintln!("✓ Exported {} transactions to {}", count, path.display());
        }
        None => {
            write_csv(&transactions, std::io::stdout().lock())?;
        }
    }

    Ok(())
}
