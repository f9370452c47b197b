//! Declarative station field mappings.
//!
//! Each output format lists which table columns it copies, under which key
//! and with which formatting. Rendering walks the list; nothing here knows
//! about JSON or XML.

use super::cell::Cell;
use super::frame::StationTable;
use crate::error::Result;

/// How a column value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Trimmed text
    Text,
    /// Fixed-point number with the given number of decimals
    Fixed(usize),
    /// Whole number
    Integer,
}

impl Format {
    /// Render a cell; `None` for blank/NaN numeric cells
    pub fn render(self, cell: &Cell) -> Result<Option<String>> {
        match self {
            Format::Text => Ok(Some(cell.as_text().unwrap_or_default())),
            Format::Fixed(places) => {
                let value = cell.as_number()?;
                Ok((!value.is_nan()).then(|| format_fixed(value, places)))
            }
            Format::Integer => {
                let value = cell.as_number()?;
                Ok((!value.is_nan()).then(|| format!("{}", value.trunc() as i64)))
            }
        }
    }
}

/// One column-to-key mapping
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Upper-case column name in the station table
    pub column: &'static str,
    /// Output property/attribute name
    pub key: &'static str,
    pub format: Format,
    /// Value used when the column is absent or a text cell is blank
    pub default: Option<&'static str>,
}

const fn field(column: &'static str, key: &'static str, format: Format) -> FieldSpec {
    FieldSpec {
        column,
        key,
        format,
        default: None,
    }
}

const fn field_or(
    column: &'static str,
    key: &'static str,
    format: Format,
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        column,
        key,
        format,
        default: Some(default),
    }
}

/// Feature properties of the JSON writer (after `code`)
pub const JSON_PROPERTIES: &[FieldSpec] = &[
    field("NAME", "name", Format::Text),
    field("NETID", "network", Format::Text),
    field("DISTANCE", "distance", Format::Fixed(1)),
    field("INTENSITY", "intensity", Format::Fixed(1)),
    field("NRESP", "nresp", Format::Integer),
    field("INTENSITY_STDDEV", "intensity_stddev", Format::Fixed(2)),
    field("SOURCE", "source", Format::Text),
    field_or("LOC", "location", Format::Text, "--"),
    field("INSTTYPE", "type", Format::Text),
    field("PROVIDER", "provider", Format::Text),
    field("INSTRUMENT", "instrument", Format::Text),
    field_or("SERIAL", "serial", Format::Text, "None"),
    field("PERIOD", "period", Format::Text),
    field("DAMPING", "damping", Format::Text),
    field("SENSITIVITY", "sensitivity", Format::Text),
    field("SOURCE_FORMAT", "source_format", Format::Text),
    field("STRUCTURE", "structure", Format::Text),
];

/// Station attributes of the XML writer (after `code`, `lat`, `lon`)
pub const XML_ATTRIBUTES: &[FieldSpec] = &[
    field("NAME", "name", Format::Text),
    field("NETID", "netid", Format::Text),
    field("DISTANCE", "dist", Format::Fixed(1)),
    field("INTENSITY", "intensity", Format::Fixed(1)),
    field("NRESP", "nresp", Format::Integer),
    field("INTENSITY_STDDEV", "intensity_stddev", Format::Fixed(2)),
    field("SOURCE", "source", Format::Text),
    field("LOC", "loc", Format::Text),
    field("INSTTYPE", "insttype", Format::Text),
    field("ELEV", "elev", Format::Fixed(1)),
];

/// Fixed-point rendering used for coordinates and amplitudes
pub fn format_fixed(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// Render the mapped fields of one row, in list order
pub fn render_fields(
    table: &StationTable,
    row: usize,
    specs: &[FieldSpec],
) -> Result<Vec<(&'static str, String)>> {
    let mut out = Vec::with_capacity(specs.len());
    for spec in specs {
        let rendered = match table.field(row, spec.column) {
            Some(cell) if spec.format == Format::Text && cell.is_blank() => {
                Some(spec.default.unwrap_or_default().to_string())
            }
            Some(cell) => spec.format.render(cell)?,
            None => spec.default.map(str::to_string),
        };
        if let Some(value) = rendered {
            out.push((spec.key, value));
        }
    }
    Ok(out)
}
