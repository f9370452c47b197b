//! In-memory station tables.
//!
//! Two sheet shapes are supported and hidden behind [`StationTable`]:
//!
//! - [`Layout::Grouped`]: a two-row header where each channel name spans the
//!   measurement columns recorded for it (`HHE` over `PGA`, `PGV`, ...)
//! - [`Layout::Flat`]: a single header row; measurements, if any, come one
//!   per row in CHANNEL/IMT/VALUE/FLAG columns
//!
//! Downstream code reads station fields through [`StationTable::field`] and
//! grouped measurements through [`StationTable::get`] without caring which
//! shape was parsed.

use std::collections::BTreeSet;

use super::cell::{Cell, EMPTY};
use super::schema::is_station_column;
use crate::error::Result;

/// Header shape of a station table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grouped,
    Flat,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Grouped => "grouped",
            Layout::Flat => "flat",
        }
    }
}

/// A column header: top-level name plus the measurement name below it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    pub name: String,
    pub sub: Option<String>,
}

impl ColumnKey {
    /// Upper-cased, trimmed key; blank sub headers become `None`
    pub fn new(name: &str, sub: Option<&str>) -> Self {
        Self {
            name: name.trim().to_ascii_uppercase(),
            sub: sub
                .map(|s| s.trim().to_ascii_uppercase())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Parsed station table
#[derive(Debug, Clone, PartialEq)]
pub struct StationTable {
    layout: Layout,
    columns: Vec<ColumnKey>,
    rows: Vec<Vec<Cell>>,
}

impl StationTable {
    /// Build a table; rows are padded or cut to the number of columns
    pub fn new(layout: Layout, columns: Vec<ColumnKey>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self {
            layout,
            columns,
            rows,
        }
    }

    /// Build a flat table from plain column names
    pub fn flat(columns: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        let columns = columns.iter().map(|c| ColumnKey::new(c, None)).collect();
        Self::new(Layout::Flat, columns, rows)
    }

    /// Build a grouped table from `(top, sub)` header pairs; use an empty
    /// sub header for station columns
    pub fn grouped(columns: &[(&str, &str)], rows: Vec<Vec<Cell>>) -> Self {
        let columns = columns
            .iter()
            .map(|(top, sub)| ColumnKey::new(top, Some(sub)))
            .collect();
        Self::new(Layout::Grouped, columns, rows)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct top-level header names, in sheet order
    pub fn top_headers(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// True if a top-level column with this name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Top-level names that are not station columns.
    ///
    /// Every such column is a channel name, in either layout. Only grouped
    /// tables carry measurements under them.
    pub fn channel_candidates(&self) -> Vec<String> {
        self.top_headers()
            .into_iter()
            .filter(|name| !is_station_column(name))
            .map(str::to_string)
            .collect()
    }

    /// Measurement names recorded under a channel
    pub fn measurements(&self, channel: &str) -> Vec<&str> {
        match self.layout {
            Layout::Grouped => self
                .columns
                .iter()
                .filter(|c| c.name.eq_ignore_ascii_case(channel))
                .filter_map(|c| c.sub.as_deref())
                .collect(),
            Layout::Flat => Vec::new(),
        }
    }

    /// Station field `name` in `row`; `None` if there is no such column
    pub fn field(&self, row: usize, name: &str) -> Option<&Cell> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))?;
        Some(self.cell(row, idx))
    }

    /// Measurement of a channel in `row`.
    ///
    /// `Ok(None)` when the table has no such column; a blank cell reads as NaN.
    pub fn get(&self, row: usize, channel: &str, measurement: &str) -> Result<Option<f64>> {
        match self.layout {
            Layout::Grouped => match self.column_index(channel, Some(measurement)) {
                Some(idx) => self.cell(row, idx).as_number().map(Some),
                None => Ok(None),
            },
            Layout::Flat => Ok(None),
        }
    }

    /// Index of the column with the given top and sub header
    pub fn column_index(&self, name: &str, sub: Option<&str>) -> Option<usize> {
        self.columns.iter().position(|c| {
            c.name.eq_ignore_ascii_case(name)
                && match (c.sub.as_deref(), sub) {
                    (Some(have), Some(want)) => have.eq_ignore_ascii_case(want),
                    (None, None) => true,
                    _ => false,
                }
        })
    }

    /// Cell at `(row, column)`, empty when out of range
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Append a station-level column filled from `values`
    pub(crate) fn push_column(&mut self, key: ColumnKey, values: impl Fn(usize) -> Cell) {
        self.columns.push(key);
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.push(values(i));
        }
    }

    /// Convert every cell of a column to a number, blanks becoming NaN
    pub(crate) fn coerce_numeric(&mut self, column: usize) -> Result<()> {
        for row in &mut self.rows {
            let value = row[column].as_number()?;
            row[column] = Cell::Number(value);
        }
        Ok(())
    }
}
