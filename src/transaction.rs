// 💸 Transaction - one recorded monetary event
//
// Identity is an explicit UUID, never the timestamp: two transactions recorded
// within the same clock tick must stay independently addressable.

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{LedgerError, Result};

/// Timestamp layout written for new transactions (UTC, microseconds, no offset)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Positive = income, negative = expense
    pub amount: f64,

    pub category: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// ISO-8601 creation time, persisted under `date`
    #[serde(rename = "date", default, deserialize_with = "null_as_empty")]
    pub timestamp: String,

    /// Stable identity (UUID). Older files carry no id; see `init_identity`.
    #[serde(default)]
    pub id: String,
}

/// Older files may hold `null` where a string belongs
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time in the ledger's timestamp layout
pub fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

impl Transaction {
    /// Create a transaction stamped with a fresh id and the current time
    pub fn new(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Transaction {
            amount,
            category: category.into(),
            description: description.into(),
            timestamp: now_timestamp(),
            id: new_id(),
        }
    }

    /// Builder pattern: override the timestamp (blank keeps the current one)
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        let timestamp = timestamp.into();
        if !timestamp.trim().is_empty() {
            self.timestamp = timestamp;
        }
        self
    }

    /// Fill in a missing id or timestamp on a record read from disk.
    /// Returns true if anything was assigned.
    pub fn init_identity(&mut self) -> bool {
        let mut changed = false;

        if self.id.is_empty() {
            self.id = new_id();
            changed = true;
        }

        if self.timestamp.is_empty() {
            self.timestamp = now_timestamp();
            changed = true;
        }

        changed
    }

    pub fn identity(&self) -> &str {
        &self.id
    }
}

/// One listing line: date, right-aligned amount, padded category, description
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:10.2}  {:<15}  {}",
            self.timestamp, self.amount, self.category, self.description
        )
    }
}

// ============================================================================
// INPUT SHAPE (what the CLI and HTTP layers accept)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl NewTransaction {
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        NewTransaction {
            amount,
            category: category.into(),
            description: None,
            date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Boundary checks: finite amount, non-blank category
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(LedgerError::Validation(format!(
                "amount must be a finite number, got {}",
                self.amount
            )));
        }

        if self.category.trim().is_empty() {
            return Err(LedgerError::Validation(
                "category must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate and stamp into a `Transaction`
    pub fn into_transaction(self) -> Result<Transaction> {
        self.validate()?;

        let tx = Transaction::new(
            self.amount,
            self.category,
            self.description.unwrap_or_default(),
        );

        Ok(match self.date {
            Some(date) => tx.with_timestamp(date),
            None => tx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction_has_identity() {
        let tx = Transaction::new(100.0, "Salary", "Pay");

        assert!(!tx.id.is_empty());
        assert!(!tx.timestamp.is_empty());
        assert_eq!(tx.category, "Salary");
        assert_eq!(tx.description, "Pay");
        assert!(uuid::Uuid::parse_str(tx.identity()).is_ok());
    }

    #[test]
    fn test_ids_are_unique_for_same_timestamp() {
        let a = Transaction::new(1.0, "Food", "").with_timestamp("2024-01-01T00:00:00");
        let b = Transaction::new(1.0, "Food", "").with_timestamp("2024-01-01T00:00:00");

        assert_eq!(a.timestamp, b.timestamp);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = now_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_blank_timestamp_override_is_ignored() {
        let tx = Transaction::new(5.0, "Misc", "").with_timestamp("   ");
        assert!(!tx.timestamp.trim().is_empty());
    }

    #[test]
    fn test_serialized_keys() {
        let tx = Transaction::new(-30.0, "Food", "Lunch").with_timestamp("2024-03-01T12:00:00");
        let value = serde_json::to_value(&tx).unwrap();

        assert_eq!(value["amount"], serde_json::json!(-30.0));
        assert_eq!(value["category"], "Food");
        assert_eq!(value["description"], "Lunch");
        assert_eq!(value["date"], "2024-03-01T12:00:00");
        assert_eq!(value["id"], tx.id.as_str());
        assert!(value.get("timestamp").is_none());
    }

    #[test]
    fn test_legacy_record_gets_identity() {
        let mut tx: Transaction =
            serde_json::from_str(r#"{"amount": 12.5, "category": "Food", "date": "2023-05-01T08:00:00"}"#)
                .unwrap();

        assert!(tx.id.is_empty());
        assert_eq!(tx.description, "");

        assert!(tx.init_identity());
        assert!(!tx.id.is_empty());
        assert_eq!(tx.timestamp, "2023-05-01T08:00:00");

        // Second call is a no-op
        assert!(!tx.init_identity());
    }

    #[test]
    fn test_null_strings_read_as_empty() {
        let mut tx: Transaction = serde_json::from_str(
            r#"{"amount": 5.0, "category": "Food", "description": null, "date": null}"#,
        )
        .unwrap();

        assert_eq!(tx.description, "");
        assert!(tx.timestamp.is_empty());

        // A null date is filled in like a missing one
        assert!(tx.init_identity());
        assert!(!tx.timestamp.is_empty());
    }

    #[test]
    fn test_display_line() {
        let tx = Transaction::new(-30.0, "Food", "Lunch").with_timestamp("2024-03-01T12:00:00");
        assert_eq!(
            tx.to_string(),
            "2024-03-01T12:00:00      -30.00  Food             Lunch"
        );
    }

    #[test]
    fn test_validation_rejects_blank_category() {
        let err = NewTransaction::new(10.0, "  ").into_transaction().unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_validation_rejects_non_finite_amount() {
        let err = NewTransaction::new(f64::NAN, "Food").validate().unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let err = NewTransaction::new(f64::INFINITY, "Food").validate().unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_zero_and_negative_amounts_allowed() {
        assert!(NewTransaction::new(0.0, "Adjust").validate().is_ok());
        assert!(NewTransaction::new(-99.99, "Rent").validate().is_ok());
    }

    #[test]
    fn test_client_supplied_date_is_kept() {
        let tx = NewTransaction::new(42.0, "Gift")
            .with_description("Birthday")
            .with_date("2024-12-25T09:00:00")
            .into_transaction()
            .unwrap();

        assert_eq!(tx.timestamp, "2024-12-25T09:00:00");
        assert_eq!(tx.description, "Birthday");
        assert!(!tx.id.is_empty());
    }

    #[test]
    fn test_missing_date_is_generated() {
        let input: NewTransaction =
            serde_json::from_str(r#"{"amount": 1.0, "category": "Misc"}"#).unwrap();
        let tx = input.into_transaction().unwrap();

        assert!(!tx.timestamp.is_empty());
        assert_eq!(tx.description, "");
    }
}
