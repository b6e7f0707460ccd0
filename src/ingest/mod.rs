//! Spreadsheet ingestion: format detection, table parsing and column extraction.

mod delimited;
mod workbook;

use thiserror::Error;

/// Column that holds the review text
pub const REVIEW_COLUMN: &str = "Review";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read {format} file: {reason}")]
    Unreadable {
        format: FileFormat,
        reason: String,
    },

    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("column '{0}' has no rows")]
    NoReviews(String),
}

/// Spreadsheet formats accepted for upload, decided by filename suffix only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Csv,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        if filename.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else if filename.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else {
            Err(IngestError::UnsupportedFormat(filename.to_string()))
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Xlsx => write!(f, "xlsx"),
            FileFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Header row plus data rows, every cell rendered as text
#[derive(Debug, Clone, Default)]
pub struct ReviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReviewTable {
    /// Values of the named column in row order. Short rows yield empty strings
    /// so the returned index stays aligned with the spreadsheet row.
    pub fn column(&self, name: &str) -> Result<Vec<String>, IngestError> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IngestError::MissingColumn(name.to_string()))?;

        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect())
    }
}

pub fn parse_table(format: FileFormat, bytes: &[u8]) -> Result<ReviewTable, IngestError> {
    let result = match format {
        FileFormat::Csv => delimited::read_table(bytes),
        FileFormat::Xlsx => workbook::read_table(bytes),
    };

    result.map_err(|e| IngestError::Unreadable {
        format,
        reason: e.to_string(),
    })
}

/// Full ingestion step: pick the format, parse, and pull the review column.
pub fn read_reviews(filename: &str, bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    let format = FileFormat::from_filename(filename)?;
    let table = parse_table(format, bytes)?;
    let reviews = table.column(REVIEW_COLUMN)?;

    if reviews.is_empty() {
        return Err(IngestError::NoReviews(REVIEW_COLUMN.to_string()));
    }

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_by_suffix() {
        assert_eq!(FileFormat::from_filename("reviews.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_filename("q3.reviews.xlsx").unwrap(), FileFormat::Xlsx);
    }

    #[test]
    fn rejects_other_suffixes() {
        for name in ["reviews.xls", "reviews.txt", "reviews", "reviews.csv.bak", "reviews.CSV"] {
            assert!(
                matches!(FileFormat::from_filename(name), Err(IngestError::UnsupportedFormat(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn column_lookup_is_exact() {
        let table = ReviewTable {
            headers: vec!["review".to_string(), "Rating".to_string()],
            rows: vec![vec!["ok".to_string(), "3".to_string()]],
        };
        assert!(matches!(table.column("Review"), Err(IngestError::MissingColumn(_))));
    }

    #[test]
    fn short_rows_keep_positions() {
        let table = ReviewTable {
            headers: vec!["Id".to_string(), "Review".to_string()],
            rows: vec![
                vec!["1".to_string(), "first".to_string()],
                vec!["2".to_string()],
                vec!["3".to_string(), "third".to_string()],
            ],
        };
        assert_eq!(table.column("Review").unwrap(), vec!["first", "", "third"]);
    }

    #[test]
    fn reads_reviews_from_csv() {
        let csv = b"Id,Review\n1,Great product\n2,\"Bad, really bad\"\n";
        let reviews = read_reviews("upload.csv", csv).unwrap();
        assert_eq!(reviews, vec!["Great product", "Bad, really bad"]);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let result = read_reviews("upload.csv", b"Review\n");
        assert!(matches!(result, Err(IngestError::NoReviews(_))));
    }

    #[test]
    fn missing_review_column() {
        let result = read_reviews("upload.csv", b"Comment\nnice\n");
        assert!(matches!(result, Err(IngestError::MissingColumn(c)) if c == "Review"));
    }

    #[test]
    fn garbage_xlsx_is_unreadable() {
        let result = read_reviews("upload.xlsx", b"definitely not a zip archive");
        assert!(matches!(
            result,
            Err(IngestError::Unreadable { format: FileFormat::Xlsx, .. })
        ));
    }
}
