// src/lfd/export.rs
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;

use super::record::Record;

/// Writes the header row and one line per record, using the list's display columns.
pub fn write_csv<R: Record, W: Write>(records: &[Arc<R>], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(R::columns())
        .context("Failed to write CSV header")?;

    for record in records {
        csv.write_record(record.row())
            .with_context(|| format!("Failed to write CSV row for {} {}", R::KIND, record.id()))?;
    }

    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn to_csv_string<R: Record>(records: &[Arc<R>]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).context("CSV output was not valid UTF-8")
}
