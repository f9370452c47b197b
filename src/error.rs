//! Error types for impactkit.
//!
//! This module defines a single error enum covering the palette builder,
//! the station table reader and the station table writers.

use thiserror::Error;

/// The main error type for impactkit operations.
#[derive(Error, Debug)]
pub enum ImpactError {
    /// Palette input sequences differ in length
    #[error("Length mismatch: z0={z0}, z1={z1}, rgb0={rgb0}, rgb1={rgb1}")]
    LengthMismatch {
        z0: usize,
        z1: usize,
        rgb0: usize,
        rgb1: usize,
    },

    /// The palette domain collapses to a point (or is not a number)
    #[error("Degenerate palette domain: vmin={vmin}, vmax={vmax}")]
    DegenerateDomain { vmin: f64, vmax: f64 },

    /// Breakpoints cannot form a piecewise color function
    #[error("Invalid breakpoints: {message}")]
    InvalidBreakpoints { message: String },

    /// Preset name is not registered
    #[error("Unknown preset: {name} (available: {available})")]
    UnknownPreset { name: String, available: String },

    /// Top-left cell of the workbook is not "reference"
    #[error("Reference cells are required in A1 and B1")]
    MissingReferenceHeader,

    /// One or more of STATION/LAT/LON/NETID is missing
    #[error("Input table must specify the following columns: {missing:?}")]
    MissingRequiredColumns { missing: Vec<String> },

    /// Channel names do not form a recognized naming scheme
    #[error("{channels:?} is not a valid channel grouping")]
    InvalidChannelGrouping { channels: Vec<String> },

    /// Neither intensity nor any peak ground motion column is present
    #[error("Table must contain at least one of the following data columns: {expected}")]
    NoMeasurementData { expected: String },

    /// A canonical measurement name has no matching column in a channel
    #[error("Cannot resolve measurement {imt} among columns {columns:?}")]
    UnresolvableMeasurementName { imt: String, columns: Vec<String> },

    /// Malformed input that has no more specific variant
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML serialization errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Workbook errors
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

impl ImpactError {
    /// Shorthand for building a [`ImpactError::Parse`]
    pub fn parse(message: impl Into<String>) -> Self {
        ImpactError::Parse {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with ImpactError
pub type Result<T> = std::result::Result<T, ImpactError>;
