// 🗄️ Storage - whole-file persistence for the ledger
//
// The entire transaction set is one pretty-printed JSON array. Every save
// rewrites the file; there is no append log and no atomic rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

// ============================================================================
// STORAGE TRAIT
// ============================================================================

/// Persistence boundary for a ledger
pub trait Storage {
    /// Whether a persisted ledger is present
    fn exists(&self) -> bool;

    /// Load every record. An absent store loads as empty; malformed contents
    /// fail the whole load.
    fn load(&self) -> Result<Vec<Transaction>>;

    /// Replace the stored records with `transactions`
    fn save(&mut self, transactions: &[Transaction]) -> Result<()>;
}

/// serde_json already writes two-space indentation and keeps non-ASCII as-is
fn encode(transactions: &[Transaction], path: &Path) -> Result<String> {
    serde_json::to_string_pretty(transactions).map_err(|e| LedgerError::Io {
        path: path.to_path_buf(),
        source: io::Error::from(e),
    })
}

fn decode(contents: &str, path: &Path) -> Result<Vec<Transaction>> {
    serde_json::from_str(contents).map_err(|source| LedgerError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// JSON FILE STORAGE
// ============================================================================

#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for JsonStorage {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> Result<Vec<Transaction>> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "ledger file absent, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let transactions = decode(&contents, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "loaded ledger file"
        );

        Ok(transactions)
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = encode(transactions, &self.path)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "wrote ledger file"
        );

        Ok(())
    }
}

// ============================================================================
// IN-MEMORY STORAGE
// ============================================================================

/// Keeps the serialized document in memory. `None` behaves like a missing file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed raw document contents, valid or not
    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryStorage {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    fn label() -> &'static Path {
        Path::new("<memory>")
    }
}

impl Storage for MemoryStorage {
    fn exists(&self) -> bool {
        self.contents.is_some()
    }

    fn load(&self) -> Result<Vec<Transaction>> {
        match &self.contents {
            Some(contents) => decode(contents, Self::label()),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        self.contents = Some(encode(transactions, Self::label())?);
        Ok(())
    }
}
