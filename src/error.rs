// Ledger error taxonomy
// Storage and Ledger never swallow these; presentation layers decide what to do.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The persisted file exists but is not a valid transaction array
    #[error("failed to parse ledger file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure while reading or writing the ledger file
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transaction not found: {0}")]
    NotFound(String),

    #[error("invalid transaction: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
