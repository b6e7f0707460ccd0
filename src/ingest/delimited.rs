use super::ReviewTable;
use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// Parse comma-separated text. The first record is the header row.
pub(super) fn read_table(bytes: &[u8]) -> Result<ReviewTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .context("invalid header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("invalid record {}", line + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ReviewTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_quoted_delimiters_and_newlines() {
        let csv = b"Review,Stars\n\"It's fine, mostly\",4\n\"two\nlines\",2\n";
        let table = read_table(csv).unwrap();
        assert_eq!(table.headers, vec!["Review", "Stars"]);
        assert_eq!(table.rows[0][0], "It's fine, mostly");
        assert_eq!(table.rows[1][0], "two\nlines");
    }

    #[test]
    fn tolerates_ragged_rows() {
        let table = read_table(b"Id,Review\n1\n2,ok,extra\n").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1"]);
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(read_table(b"Review\n\xff\xfe\xfd\n").is_err());
    }
}
