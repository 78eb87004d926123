//! Row and table model for parsed telemetry.
//!
//! A [`Row`] is one source line split into whitespace-delimited tokens. A
//! [`Table`] is the ordered list of rows produced by the parser. Columns carry no
//! schema: callers address them by zero-based position and every access is
//! checked.

use crate::error::{Result, TelelogError};
use std::fmt;

/// One telemetry record: the tokens of a single non-blank source line.
///
/// A row always holds at least one token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    tokens: Vec<String>,
}

#[allow(clippy::len_without_is_empty)]
impl Row {
    /// Build a row from its tokens. Returns `None` when there are no tokens.
    pub fn new<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// Token at `column`, if the row is long enough.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.tokens.get(column).map(String::as_str)
    }

    /// Number of tokens in the row (always at least 1)
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Interpret the token at `column` as a number.
    ///
    /// # Errors
    /// * `MissingColumn` if the row has no token at `column`
    /// * `Conversion` if the token does not parse as a float, or is not finite
    ///   (`NaN`, `inf`, `infinity`)
    pub fn number(&self, column: usize) -> Result<f64> {
        let token = self.get(column).ok_or(TelelogError::MissingColumn {
            column,
            len: self.len(),
        })?;

        token
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| TelelogError::Conversion {
                column,
                token: token.to_string(),
            })
    }
}

impl fmt::Display for Row {
    /// Tokens joined by single spaces
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = self.tokens.iter();
        if let Some(first) = tokens.next() {
            f.write_str(first)?;
        }
        for token in tokens {
            write!(f, " {token}")?;
        }
        Ok(())
    }
}

/// Ordered collection of rows, in source line order until sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Mutable access for in-place reordering by the query layer.
    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for Table {
    /// One row per line, each terminated by a newline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
