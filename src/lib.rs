// Finance Ledger - Core Library
// Exposes all modules for use in the CLI, the API server, and tests

pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod transaction;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{init_logging, StorageArgs, DEFAULT_ADDR, DEFAULT_DATA_PATH};
pub use error::{LedgerError, Result};
pub use export::{export_csv, write_csv};
pub use ledger::{Ledger, Summary};
pub use storage::{JsonStorage, MemoryStorage, Storage};
pub use transaction::{NewTransaction, Transaction};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
