//! CSV export.
//!
//! Format: header row of field names in the record type's column order, one
//! row per record, every cell quoted with inner quotes doubled, rows joined by
//! `\n` without a trailing newline.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use erpdesk_core::Record;

use crate::error::ExportError;

pub const CSV_MIME: &str = "text/csv";

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub content: String,
}

impl ExportArtifact {
    /// `<prefix>_<YYYY-MM-DD>.csv`.
    pub fn csv(prefix: &str, stamp: NaiveDate, content: String) -> Self {
        Self {
            filename: format!("{}_{}.csv", prefix, stamp.format("%Y-%m-%d")),
            mime: CSV_MIME,
            content,
        }
    }

    /// Write into `dir` under the artifact's file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, self.content.as_bytes())?;
        info!(path = %path.display(), bytes = self.content.len(), "export written");
        Ok(path)
    }
}

/// Serialize `records` using `R::columns()` as the header.
pub fn to_csv<R: Record>(records: &[&R]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(R::columns())?;
    for record in records {
        writer.write_record(R::columns().iter().map(|c| record.field(c).export_text()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Row, date};

    #[test]
    fn every_cell_is_quoted_and_quotes_doubled() {
        let rows = [Row::new(1)
            .dated(date(2024, 1, 31))
            .name("Acme \"Tools\", Ltd")
            .status("paid")
            .amount(1250.5)];
        let refs: Vec<&Row> = rows.iter().collect();

        let text = to_csv(&refs).unwrap();

        assert_eq!(
            text,
            "\"id\",\"date\",\"name\",\"status\",\"amount\",\"reference\"\n\
             \"1\",\"2024-01-31\",\"Acme \"\"Tools\"\", Ltd\",\"paid\",\"1250.5\",\"\""
        );
    }

    #[test]
    fn empty_set_exports_only_the_header() {
        let text = to_csv::<Row>(&[]).unwrap();
        assert_eq!(text, "\"id\",\"date\",\"name\",\"status\",\"amount\",\"reference\"");
    }

    #[test]
    fn round_trip_preserves_field_values() {
        let rows = [
            Row::new(1).name("Line\nbreak").status("open").amount(10.0),
            Row::new(2).name("Comma, quote \" and ; semicolon").dated(date(2023, 12, 1)),
            Row::new(3),
        ];
        let refs: Vec<&Row> = rows.iter().collect();

        let text = to_csv(&refs).unwrap();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, Row::columns());

        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        assert_eq!(parsed.len(), rows.len());
        for (row, cells) in rows.iter().zip(&parsed) {
            for (column, cell) in Row::columns().iter().zip(cells) {
                assert_eq!(&row.field(column).export_text(), cell);
            }
        }
    }

    #[test]
    fn artifact_name_is_date_stamped() {
        let artifact = ExportArtifact::csv("invoices", date(2024, 7, 4), String::new());
        assert_eq!(artifact.filename, "invoices_2024-07-04.csv");
        assert_eq!(artifact.mime, "text/csv");
    }

    #[test]
    fn artifact_is_written_to_directory() {
        let dir = std::env::temp_dir().join(format!("erpdesk-export-{}", std::process::id()));
        let artifact = ExportArtifact::csv("quotes", date(2024, 1, 2), "\"id\"".to_string());

        let path = artifact.write_to(&dir).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\"id\"");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
