//! Query operations over a parsed [`Table`].
//!
//! Sorting reorders the table in place. Search and filter borrow the table and
//! return a new one holding copies of the selected rows, in their original
//! relative order.

use crate::error::{Result, TelelogError};
use crate::table::{Row, Table};

/// Sort rows ascending by the token at `column`, compared byte-wise.
///
/// The sort is stable. A row with no token at `column` orders before every
/// row that has one.
pub fn sort_by_column(table: &mut Table, column: usize) {
    table
        .rows_mut()
        .sort_by(|a, b| a.get(column).cmp(&b.get(column)));
}

/// Strict form of [`sort_by_column`] that refuses tables with short rows.
///
/// # Errors
/// `MalformedRow` naming the first row shorter than `column + 1`. The table
/// is left untouched in that case.
pub fn try_sort_by_column(table: &mut Table, column: usize) -> Result<()> {
    if let Some((row, short)) = table
        .iter()
        .enumerate()
        .find(|(_, row)| row.get(column).is_none())
    {
        return Err(TelelogError::MalformedRow {
            row,
            column,
            len: short.len(),
        });
    }

    sort_by_column(table, column);
    Ok(())
}

/// Rows whose token at `column` equals `keyword` exactly (case-sensitive).
///
/// Rows too short to have `column` are skipped.
pub fn search(table: &Table, keyword: &str, column: usize) -> Table {
    filter(table, |row| row.get(column) == Some(keyword))
}

/// Rows for which `predicate` holds.
pub fn filter<P>(table: &Table, mut predicate: P) -> Table
where
    P: FnMut(&Row) -> bool,
{
    table.iter().filter(|row| predicate(row)).cloned().collect()
}

/// Rows for which a fallible `predicate` holds.
///
/// The first predicate error aborts the whole filter and is returned.
pub fn try_filter<P>(table: &Table, mut predicate: P) -> Result<Table>
where
    P: FnMut(&Row) -> Result<bool>,
{
    let mut selected = Table::new();
    for row in table {
        if predicate(row)? {
            selected.push(row.clone());
        }
    }
    Ok(selected)
}

/// Numeric "column value greater than" predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub column: usize,
    pub min: f64,
}

impl Threshold {
    pub fn new(column: usize, min: f64) -> Self {
        Self { column, min }
    }

    /// Lenient check: short rows and non-numeric tokens do not match.
    pub fn matches(&self, row: &Row) -> bool {
        row.number(self.column)
            .map(|value| value > self.min)
            .unwrap_or(false)
    }

    /// Strict check for [`try_filter`].
    ///
    /// Short rows do not match. A token that is present but not numeric is a
    /// `Conversion` error.
    pub fn try_matches(&self, row: &Row) -> Result<bool> {
        if row.get(self.column).is_none() {
            return Ok(false);
        }
        Ok(row.number(self.column)? > self.min)
    }
}
