use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::table::ReportTable;

pub fn write_report<P: AsRef<Path>>(table: &ReportTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;

    write_table(table, writer)?;
    info!("Wrote {} player rows to {}", table.rows.len(), path.display());
    Ok(())
}

pub fn write_table<W: Write>(table: &ReportTable, mut writer: csv::Writer<W>) -> Result<()> {
    writer
        .write_record(&table.header)
        .context("Failed to write report header")?;

    for row in &table.rows {
        let cells = row.iter().map(|cell| cell.as_deref().unwrap_or(""));
        writer
            .write_record(cells)
            .context("Failed to write report row")?;
    }

    writer.flush().context("Failed to flush report")?;
    Ok(())
}
