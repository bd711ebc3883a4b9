// ⚙️ Configuration - data location, server address, logging

use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::ledger::Ledger;
use crate::storage::JsonStorage;

/// Where the ledger lives unless told otherwise
pub const DEFAULT_DATA_PATH: &str = "data/transactions.json";

/// Default bind address for the API server
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// `--data` flag shared by the CLI and the server
#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Path of the JSON ledger file
    #[arg(long, env = "FINANCE_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,
}

impl StorageArgs {
    pub fn storage(&self) -> JsonStorage {
        JsonStorage::new(&self.data)
    }

    pub fn open_ledger(&self) -> crate::Result<Ledger> {
        Ledger::open(self.storage())
    }
}

/// Install the fmt subscriber on stderr. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be set (tests); that's fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::storage::tests::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        storage: StorageArgs,
    }

    #[test]
    fn test_explicit_data_path() {
        let cli = TestCli::parse_from(["test", "--data", "/tmp/ledger.json"]);
        assert_eq!(cli.storage.data, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(cli.storage.storage().path(), PathBuf::from("/tmp/ledger.json"));
    }

    #[test]
    fn test_open_ledger_on_fresh_path() {
        let tmp = TempDir::new();
        let path = tmp.join("transactions.json");
        let args = StorageArgs { data: path };

        let ledger = args.open_ledger().unwrap();
        assert!(ledger.is_empty());
    }
}
