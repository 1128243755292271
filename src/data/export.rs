use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Table;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write `table` to a CSV file at `path`.
///
/// The header row lists the schema's column names; dates are ISO-8601.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv_to(table, file)?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}

pub fn write_csv_to<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(table.schema().iter().map(|c| c.name()))
        .context("writing CSV header")?;

    for (row_no, record) in table.iter().enumerate() {
        let cells: Vec<String> = table
            .schema()
            .iter()
            .map(|&col| {
                record
                    .value(col)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect();
        writer
            .write_record(&cells)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
