// ============================================================
// RESULT CSV
// ============================================================
// Serialize TestCaseResult rows with standard quoting, and parse them back

use chrono::{DateTime, TimeZone};
use csv::{QuoteStyle, ReaderBuilder, Trim, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::test_case_result::TestCaseResult;

/// Column order of the export, matching `TestCaseResult` field names.
pub const CSV_HEADERS: [&str; 5] = [
    "timestamp",
    "requirement",
    "test_cases",
    "compliance_tags",
    "traceability_id",
];

/// CSV codec for the result table. Comma-delimited, header row first.
#[derive(Default)]
pub struct ResultCsv;

impl ResultCsv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header row followed by one row per result, in the given order.
    /// The header is written even when there are no rows.
    pub fn write(&self, results: &[TestCaseResult]) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADERS)?;
        for result in results {
            writer.serialize(result)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::IoError(format!("Failed to flush CSV writer: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::ParseError(format!("CSV output is not UTF-8: {}", e)))
    }

    /// Reads an export back. Fields are not trimmed so text survives exactly.
    pub fn read(&self, content: &str) -> Result<Vec<TestCaseResult>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::None)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        if headers.iter().ne(CSV_HEADERS.iter().copied()) {
            return Err(AppError::ParseError(format!(
                "Unexpected CSV headers: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<TestCaseResult>().enumerate() {
            let row: TestCaseResult = record.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(row);
        }
        Ok(rows)
    }
}

/// `test_cases_YYYYMMDD_HHMMSS.csv`
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("test_cases_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
