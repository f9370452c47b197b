//! Strong-motion station workbook reader.
//!
//! Sheet layout:
//!
//! ```text
//! | REFERENCE | <reference text> |     |         |         |
//! | STATION   | LAT              | ... | HHE     | HHN     | ...
//! |           |                  |     | PGA|PGV | PGA|PGV | ...   <- grouped only
//! | data rows ...
//! ```
//!
//! A blank A3 means the second header row is present (grouped by channel);
//! otherwise data starts right below the first header row.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::{debug, warn};

use super::cell::{Cell, EMPTY};
use super::frame::{ColumnKey, Layout, StationTable};
use super::imt::is_pgm_column;
use super::schema::{validate_channel_grouping, REQUIRED_COLUMNS};
use crate::error::{ImpactError, Result};
use crate::logging::log_table_stats;

/// A station table together with the sheet's reference string
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWorkbook {
    pub table: StationTable,
    pub reference: Option<String>,
}

/// Read the first worksheet of an Excel/ODS workbook
pub fn read_workbook(path: impl AsRef<Path>) -> Result<ParsedWorkbook> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImpactError::parse(format!("{} has no worksheets", path.display())))??;

    let parsed = parse_grid(&range_to_grid(&range))?;
    log_table_stats(
        &path.display().to_string(),
        parsed.table.len(),
        &parsed.table.channel_candidates(),
        parsed.table.layout().as_str(),
    );
    Ok(parsed)
}

/// Dense grid anchored at A1
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };
    (0..=end_row)
        .map(|r| {
            (0..=end_col)
                .map(|c| range.get_value((r, c)).map(Cell::from).unwrap_or_default())
                .collect()
        })
        .collect()
}

fn at(grid: &[Vec<Cell>], row: usize, col: usize) -> &Cell {
    grid.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
}

/// Parse a worksheet already loaded into rows of cells
pub fn parse_grid(grid: &[Vec<Cell>]) -> Result<ParsedWorkbook> {
    let is_reference = at(grid, 0, 0)
        .as_text()
        .is_some_and(|s| s.eq_ignore_ascii_case("reference"));
    if !is_reference {
        return Err(ImpactError::MissingReferenceHeader);
    }
    let reference = at(grid, 0, 1).as_text();

    let layout = if at(grid, 2, 0).is_blank() {
        Layout::Grouped
    } else {
        Layout::Flat
    };
    debug!(layout = layout.as_str(), "Detected sheet layout");

    let mut table = build_table(grid, layout);

    if !table.has_column("STATION") {
        warn!("No STATION column, numbering stations by row");
        let key = ColumnKey::new("STATION", None);
        table.push_column(key, |i| Cell::Number(i as f64));
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImpactError::MissingRequiredColumns { missing });
    }

    let channels = table.channel_candidates();
    validate_channel_grouping(&channels)?;

    let mut found = table.has_column("INTENSITY");
    let measurement_columns: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, key)| match (&key.sub, layout) {
            (Some(sub), Layout::Grouped) => channels.contains(&key.name) && is_pgm_column(sub),
            (_, Layout::Flat) => key.name == "VALUE",
            _ => false,
        })
        .map(|(i, _)| i)
        .collect();
    for idx in measurement_columns {
        found = true;
        table.coerce_numeric(idx)?;
    }

    if !found {
        return Err(ImpactError::NoMeasurementData {
            expected: "PGA, PGV, SA(0.3), SA(1.0), SA(3.0), INTENSITY".to_string(),
        });
    }

    Ok(ParsedWorkbook { table, reference })
}

fn build_table(grid: &[Vec<Cell>], layout: Layout) -> StationTable {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let (header_rows, first_data) = match layout {
        Layout::Grouped => (2, 3),
        Layout::Flat => (1, 2),
    };

    let mut keep = Vec::new();
    let mut columns = Vec::new();
    let mut top = String::new();
    for col in 0..width {
        // Merged channel headers only fill their first cell
        if let Some(name) = at(grid, 1, col).as_text() {
            top = name;
        }
        let sub = if header_rows == 2 {
            at(grid, 2, col).as_text()
        } else {
            None
        };
        if top.is_empty() || (layout == Layout::Flat && at(grid, 1, col).is_blank()) {
            continue;
        }
        keep.push(col);
        columns.push(ColumnKey::new(&top, sub.as_deref()));
    }

    let rows = grid
        .iter()
        .skip(first_data)
        .filter(|row| !row.iter().all(Cell::is_blank))
        .map(|row| {
            keep.iter()
                .map(|&c| row.get(c).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    StationTable::new(layout, columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[Cell]) -> Vec<Cell> {
        cells.to_vec()
    }

    fn t(s: &str) -> Cell {
        Cell::from(s)
    }

    fn n(v: f64) -> Cell {
        Cell::from(v)
    }

    fn grouped_grid() -> Vec<Vec<Cell>> {
        vec![
            row(&[t("Reference"), t("Test data set")]),
            row(&[
                t("STATION"),
                t("LAT"),
                t("LON"),
                t("NETID"),
                t("HHE"),
                Cell::Empty,
                t("HHN"),
                Cell::Empty,
            ]),
            row(&[
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                t("pga"),
                t("SA(1.0)"),
                t("pga"),
                t("SA(1.0)"),
            ]),
            row(&[t("ST1"), n(34.1), n(-118.2), t("CI"), n(0.1), t(" "), n(0.3), n(0.4)]),
        ]
    }

    #[test]
    fn test_grouped_sheet() {
        let parsed = parse_grid(&grouped_grid()).unwrap();
        assert_eq!(parsed.reference.as_deref(), Some("Test data set"));
        let table = parsed.table;
        assert_eq!(table.layout(), Layout::Grouped);
        assert_eq!(table.channel_candidates(), vec!["HHE", "HHN"]);
        assert_eq!(table.measurements("HHE"), vec!["PGA", "SA(1.0)"]);
        assert_eq!(table.get(0, "HHN", "SA(1.0)").unwrap(), Some(0.4));
        // Whitespace-only cells become NaN
        assert!(table.get(0, "HHE", "SA(1.0)").unwrap().unwrap().is_nan());
    }

    #[test]
    fn test_flat_sheet() {
        let grid = vec![
            row(&[t("reference"), Cell::Empty]),
            row(&[t("station"), t("lat"), t("lon"), t("netid"), t("intensity")]),
            row(&[t("A1"), n(1.0), n(2.0), t("XX"), n(5.5)]),
            row(&[Cell::Empty, Cell::Empty]),
        ];
        let parsed = parse_grid(&grid).unwrap();
        assert_eq!(parsed.reference, None);
        assert_eq!(parsed.table.layout(), Layout::Flat);
        assert_eq!(parsed.table.len(), 1);
        assert_eq!(parsed.table.field(0, "INTENSITY"), Some(&Cell::Number(5.5)));
    }

    #[test]
    fn test_missing_reference_header() {
        let mut grid = grouped_grid();
        grid[0][0] = t("STATION");
        assert!(matches!(
            parse_grid(&grid),
            Err(ImpactError::MissingReferenceHeader)
        ));
    }

    #[test]
    fn test_missing_required_columns() {
        let mut grid = grouped_grid();
        grid[1][3] = t("NETWORK");
        match parse_grid(&grid) {
            Err(ImpactError::MissingRequiredColumns { missing }) => {
                assert_eq!(missing, vec!["NETID".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_station_synthesized_from_row() {
        let grid = vec![
            row(&[t("reference"), t("x")]),
            row(&[t("LAT"), t("LON"), t("NETID"), t("INTENSITY")]),
            row(&[n(1.0), n(2.0), t("XX"), n(3.0)]),
            row(&[n(1.5), n(2.5), t("XX"), n(4.0)]),
        ];
        let table = parse_grid(&grid).unwrap().table;
        assert_eq!(table.field(1, "STATION"), Some(&Cell::Number(1.0)));
    }

    #[test]
    fn test_invalid_channel_grouping() {
        let mut grid = grouped_grid();
        grid[1][6] = t("XX9");
        assert!(matches!(
            parse_grid(&grid),
            Err(ImpactError::InvalidChannelGrouping { .. })
        ));
    }

    #[test]
    fn test_flat_sheet_channel_grouping() {
        let grid = vec![
            row(&[t("reference"), t("flat")]),
            row(&[t("STATION"), t("LAT"), t("LON"), t("NETID"), t("INTENSITY"), t("XX9")]),
            row(&[t("A"), n(1.0), n(2.0), t("NN"), n(3.0), n(0.1)]),
        ];
        match parse_grid(&grid) {
            Err(ImpactError::InvalidChannelGrouping { channels }) => {
                assert_eq!(channels, vec!["XX9".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        // Long-form columns are not channels
        let grid = vec![
            row(&[t("reference"), t("long")]),
            row(&[t("STATION"), t("LAT"), t("LON"), t("NETID"), t("CHANNEL"), t("IMT"), t("VALUE"), t("FLAG")]),
            row(&[t("A"), n(1.0), n(2.0), t("NN"), t("HNE"), t("PGA"), n(0.5), t("0")]),
        ];
        let parsed = parse_grid(&grid).unwrap();
        assert!(parsed.table.channel_candidates().is_empty());
    }

    #[test]
    fn test_no_measurement_data() {
        let mut grid = grouped_grid();
        for col in 4..8 {
            grid[2][col] = t("NOTES");
        }
        assert!(matches!(
            parse_grid(&grid),
            Err(ImpactError::NoMeasurementData { .. })
        ));
    }

    #[test]
    fn test_unparsable_measurement_is_parse_error() {
        let mut grid = grouped_grid();
        grid[3][4] = t("n/a");
        assert!(matches!(parse_grid(&grid), Err(ImpactError::Parse { .. })));
    }
}
