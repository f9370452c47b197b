//! # impactkit
//!
//! Utilities for a seismic impact data pipeline.
//!
//! ## Key Features
//!
//! - **Color palettes**: map scalar data (shaking intensity, population
//!   density) onto interpolated RGBA colors from breakpoint tables, built-in
//!   presets or palette files
//! - **Station tables**: read strong-motion station workbooks into a
//!   validated table and write them out as a JSON feature collection or a
//!   ShakeMap station XML document
//!
//! The two halves share no state.

pub mod config;
pub mod error;
pub mod logging;
pub mod palette;
pub mod table;

pub use config::{Config, ExportConfig};
pub use error::{ImpactError, Result};
pub use logging::{
    generate_run_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_table_stats, log_timed_operation,
};
pub use palette::{BreakpointTable, ColorPalette, Colormap};
pub use table::{read_workbook, write_json, write_xml, StationTable};
