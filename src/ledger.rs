// 📒 Ledger - resident transaction list plus derived aggregates
//
// Every mutation rewrites the whole backing store. Reads never touch disk.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{LedgerError, Result};
use crate::storage::{JsonStorage, Storage};
use crate::transaction::Transaction;

// ============================================================================
// CATEGORY SUMMARY
// ============================================================================

/// Category totals in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    totals: Vec<(String, f64)>,
}

impl Summary {
    fn add(&mut self, category: &str, amount: f64) {
        match self.totals.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += amount,
            None => self.totals.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.totals
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.totals.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Serializes as a JSON object keyed by category
impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.totals.len()))?;
        for (category, total) in &self.totals {
            map.serialize_entry(category, total)?;
        }
        map.end()
    }
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug)]
pub struct Ledger<S: Storage = JsonStorage> {
    storage: S,
    transactions: Vec<Transaction>,
}

impl<S: Storage> Ledger<S> {
    /// Load everything the store holds. Records written before transactions
    /// carried ids get one now, and the file is rewritten once so those ids
    /// survive a restart. A failed write-back is only logged: the ledger still
    /// opens, and the ids are persisted by the next successful mutation.
    pub fn open(storage: S) -> Result<Self> {
        let mut transactions = if storage.exists() {
            storage.load()?
        } else {
            Vec::new()
        };

        let upgraded = transactions
            .iter_mut()
            .map(Transaction::init_identity)
            .filter(|changed| *changed)
            .count();

        let mut ledger = Ledger {
            storage,
            transactions,
        };

        if upgraded > 0 {
            tracing::warn!(count = upgraded, "assigned identifiers to legacy transactions");
            if let Err(e) = ledger.persist() {
                tracing::warn!(error = %e, "could not write back assigned identifiers");
            }
        }

        Ok(ledger)
    }

    /// Append and persist. No validation happens here; zero and negative
    /// amounts are legitimate. A failed save leaves the ledger as it was.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<()> {
        let id = tx.id.clone();
        self.transactions.push(tx);

        if let Err(e) = self.persist() {
            self.transactions.pop();
            return Err(e);
        }

        tracing::info!(%id, count = self.transactions.len(), "added transaction");
        Ok(())
    }

    /// Snapshot copy in insertion order
    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// 0.0 (never -0.0) for an empty ledger
    pub fn get_balance(&self) -> f64 {
        self.transactions.iter().fold(0.0, |acc, tx| acc + tx.amount)
    }

    pub fn summary_by_category(&self) -> Summary {
        let mut summary = Summary::default();
        for tx in &self.transactions {
            summary.add(&tx.category, tx.amount);
        }
        summary
    }

    /// Drop every transaction with this id and persist the rest.
    /// Returns how many were removed.
    pub fn remove_transaction(&mut self, id: &str) -> Result<usize> {
        let kept: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|tx| tx.id != id)
            .cloned()
            .collect();

        let removed = self.transactions.len() - kept.len();
        if removed == 0 {
            return Err(LedgerError::NotFound(id.to_string()));
        }

        self.storage.save(&kept)?;
        self.transactions = kept;

        tracing::info!(%id, removed, count = self.transactions.len(), "removed transaction");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.save(&self.transactions)
    }
}
