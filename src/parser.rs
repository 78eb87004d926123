//! Tabular parser: line-oriented telemetry text into a [`Table`].
//!
//! Lines are split on `\n`, then on runs of ASCII whitespace. Blank lines are
//! dropped, every other line becomes one [`Row`] in source order. Tokens are
//! decoded lossily; no other normalization happens.

use crate::error::{Result, TelelogError};
use crate::file_handler::TelemetrySource;
use crate::table::{Row, Table};
use bstr::ByteSlice;

/// Token separator: the characters a C-locale `isspace` accepts.
fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Tokenize a single line. Returns `None` for lines without tokens.
pub fn parse_line(line: &[u8]) -> Option<Row> {
    Row::new(
        line.fields_with(is_separator)
            .map(|token| token.to_str_lossy().into_owned()),
    )
}

/// Parse raw bytes into a table
pub fn parse_bytes(bytes: &[u8]) -> Table {
    let mut table = Table::new();
    let mut current_pos = 0;

    while current_pos < bytes.len() {
        let line_end = memchr::memchr(b'\n', &bytes[current_pos..])
            .map(|pos| current_pos + pos)
            .unwrap_or(bytes.len());

        if let Some(row) = parse_line(&bytes[current_pos..line_end]) {
            table.push(row);
        }

        current_pos = line_end + 1;
    }

    table
}

pub fn parse_str(text: &str) -> Table {
    parse_bytes(text.as_bytes())
}

/// Read a source fully and parse it.
///
/// # Errors
/// Any failure to open or read the source (`IoUnavailable`, `NotAFile`,
/// `FileError`). Content never fails to parse.
pub async fn load_table(source: &dyn TelemetrySource) -> Result<Table> {
    let bytes = source.read_bytes().await?;
    let table = parse_bytes(bytes.as_bytes());
    log::debug!("parsed {} rows from {}", table.len(), source.name());
    Ok(table)
}

/// Outcome of a soft-failing load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub table: Table,
    /// Set when the source could not be read; `table` is then empty
    pub error: Option<TelelogError>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Load a table, recovering from an unreadable source with an empty table.
pub async fn load_or_empty(source: &dyn TelemetrySource) -> LoadReport {
    match load_table(source).await {
        Ok(table) => LoadReport { table, error: None },
        Err(error) => {
            // Reporting is left to the caller; this only traces the recovery.
            log::debug!("continuing with no data from {}: {}", source.name(), error);
            LoadReport {
                table: Table::new(),
                error: Some(error),
            }
        }
    }
}
