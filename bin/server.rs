// Finance Ledger - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use clap::Parser;

use finance_ledger::api::{router, AppState};
use finance_ledger::{init_logging, StorageArgs, DEFAULT_ADDR};

/// Finance Ledger HTTP API
#[derive(Parser)]
#[command(name = "finance-server", version)]
struct ServerArgs {
    #[command(flatten)]
    storage: StorageArgs,

    /// Address to listen on
    #[arg(long, env = "FINANCE_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_logging("info");

    println!("🌐 Finance Ledger - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let ledger = args
        .storage
        .open_ledger()
        .with_context(|| format!("Failed to open ledger at {}", args.storage.data.display()))?;
    println!(
        "✓ Ledger opened: {} ({} transactions)",
        args.storage.data.display(),
        ledger.len()
    );

    let app = router(AppState::new(ledger));

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", args.addr))?;

    println!("\n🚀 Server running on http://{}", args.addr);
    println!("   API: http://{}/transactions", args.addr);
    println!("\n   Press Ctrl+C to stop\n");
    tracing::info!(addr = %args.addr, "listening");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
