// CSV export of the ledger

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::transaction::Transaction;

/// Write transactions as CSV (header: amount,category,description,date,id).
/// Returns the number of rows written.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    for tx in transactions {
        wtr.serialize(tx)
            .with_context(|| format!("Failed to serialize transaction {}", tx.id))?;
    }

    // An empty ledger still gets a header row
    if transactions.is_empty() {
        wtr.write_record(["amount", "category", "description", "date", "id"])
            .context("Failed to write CSV header")?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(transactions.len())
}

pub fn export_csv(transactions: &[Transaction], csv_path: &Path) -> Result<usize> {
    let file = File::create(csv_path)
        .with_context(|| format!("Failed to create CSV file {}", csv_path.display()))?;
    write_csv(transactions, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::TempDir;

    #[test]
    fn test_csv_rows() {
        let txs = vec![
            Transaction::new(100.0, "Salary", "Pay").with_timestamp("2024-01-01T09:00:00"),
            Transaction::new(-30.0, "Food", "Lunch, with friends").with_timestamp("2024-01-02T12:30:00"),
        ];

        let mut out = Vec::new();
        assert_eq!(write_csv(&txs, &mut out).unwrap(), 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "amount,category,description,date,id");
        assert_eq!(lines[1], format!("100.0,Salary,Pay,2024-01-01T09:00:00,{}", txs[0].id));
        assert_eq!(
            lines[2],
            format!("-30.0,Food,\"Lunch, with friends\",2024-01-02T12:30:00,{}", txs[1].id)
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "amount,category,description,date,id\n");
    }

    #[test]
    fn test_export_to_file_reads_back() {
        let tmp = TempDir::new();
        let path = tmp.join("export.csv");
        let txs = vec![Transaction::new(-12.0, "Transport", "Taxi")];

        export_csv(&txs, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<Transaction> = rdr.deserialize::<Transaction>().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows, txs);
    }
}
