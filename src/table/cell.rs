//! Spreadsheet cell values.

use calamine::Data;

use crate::error::{ImpactError, Result};

/// A single worksheet cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

/// Shared empty cell for out-of-range lookups
pub(crate) static EMPTY: Cell = Cell::Empty;

impl Cell {
    /// True for empty cells and whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    /// Trimmed text form of the cell, `None` when blank.
    ///
    /// Integral numbers print without a fractional part so that numeric
    /// station codes come out as `123` rather than `123.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
        }
    }

    /// Numeric value of the cell; blank cells are NaN
    pub fn as_number(&self) -> Result<f64> {
        match self {
            Cell::Empty => Ok(f64::NAN),
            Cell::Number(n) => Ok(*n),
            Cell::Text(s) if s.trim().is_empty() => Ok(f64::NAN),
            Cell::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ImpactError::parse(format!("'{}' is not a number", s.trim()))),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(b.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}
