//! Strong-motion station tables.
//!
//! Reading turns a workbook into a validated [`StationTable`]; writing turns
//! that table into a JSON feature collection or a ShakeMap station XML
//! document. The two writers share row processing ([`records`]) and the
//! declarative field mappings in [`fields`].

pub mod cell;
pub mod fields;
pub mod frame;
pub mod imt;
pub mod json;
pub mod reader;
pub mod records;
pub mod schema;
pub mod xml;

pub use cell::Cell;
pub use frame::{ColumnKey, Layout, StationTable};
pub use json::{to_json_value, write_json, write_json_to};
pub use reader::{parse_grid, read_workbook, ParsedWorkbook};
pub use records::{collect_stations, Amplitude, ChannelRecord, StationRecord};
pub use xml::{to_xml_string, write_xml, write_xml_to};
