use super::ReviewTable;
use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

/// Read the first worksheet of an xlsx workbook. Its first row is the header.
pub(super) fn read_table(bytes: &[u8]) -> Result<ReviewTable> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("not a valid xlsx workbook")?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("workbook has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();

    Ok(ReviewTable {
        headers,
        rows: rows.collect(),
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
