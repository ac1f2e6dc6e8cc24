//! Output formatting functions.

pub mod json;
pub mod pretty;

use caseco_core::content::TableRecord;

use crate::cli::OutputFormat;

/// Format a list of records for output.
pub fn format_records<R: TableRecord>(records: &[R], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(&records),
        OutputFormat::Pretty => pretty::format_table(R::TABLE.as_str(), R::COLUMNS, records),
    }
}

/// Format a single record for output.
pub fn format_record<R: TableRecord>(record: &R, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json_pretty(record),
        OutputFormat::Pretty => pretty::format_record(R::COLUMNS, record),
    }
}
