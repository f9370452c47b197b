//! Station worksheet fixtures.
//!
//! Grids mirror what the workbook loader produces: row 0 holds the
//! reference cells, then one or two header rows, then data.

#![allow(dead_code)]

use impactkit::table::Cell;

pub fn t(s: &str) -> Cell {
    Cell::from(s)
}

pub fn n(v: f64) -> Cell {
    Cell::from(v)
}

pub const E: Cell = Cell::Empty;

/// Build a grouped (two header rows) grid.
///
/// `station_cols` are plain station columns; each channel gets one column
/// per entry in `measurements`. Every data row supplies station values
/// followed by channel values in channel-major order.
pub fn grouped_grid(
    reference: &str,
    station_cols: &[&str],
    channels: &[&str],
    measurements: &[&str],
    data: Vec<Vec<Cell>>,
) -> Vec<Vec<Cell>> {
    let mut top = Vec::new();
    let mut sub = Vec::new();
    for col in station_cols {
        top.push(t(col));
        sub.push(E);
    }
    for channel in channels {
        for (i, m) in measurements.iter().enumerate() {
            top.push(if i == 0 { t(channel) } else { E });
            sub.push(t(m));
        }
    }

    let mut grid = vec![vec![t("reference"), t(reference)], top, sub];
    grid.extend(data);
    grid
}

/// Three-component SEED-named stations with SA(...) style columns
pub fn seed_station_grid() -> Vec<Vec<Cell>> {
    grouped_grid(
        "Test reference",
        &["STATION", "NAME", "LAT", "LON", "NETID", "ELEV", "DISTANCE"],
        &["HHE", "HHN", "HHZ"],
        &["PGA", "PGV", "SA(0.3)", "SA(1.0)", "SA(3.0)"],
        vec![
            vec![
                t("ABC"), t("Station One"), n(34.05), n(-118.25), t("CI"), n(120.0), n(12.34),
                n(0.11), n(1.1), n(0.21), n(0.12), n(0.03),
                n(0.13), n(1.3), n(0.23), n(0.14), n(0.04),
                n(0.05), n(0.5), E, n(0.06), t(" "),
            ],
            vec![
                t("DEF"), t("Station Two"), n(35.0), n(-117.5), t("CI"), n(15.0), n(40.0),
                n(0.01), n(0.1), n(0.02), n(0.015), n(0.004),
                n(0.012), n(0.11), n(0.021), n(0.016), n(0.005),
                n(0.006), n(0.05), n(0.009), n(0.007), n(0.002),
            ],
        ],
    )
}

/// Flat sheet with intensity observations only
pub fn intensity_grid() -> Vec<Vec<Cell>> {
    vec![
        vec![t("REFERENCE"), t("DYFI")],
        vec![t("STATION"), t("LAT"), t("LON"), t("NETID"), t("INTENSITY"), t("NRESP"), t("INTENSITY_STDDEV")],
        vec![t("Z1"), n(1.0), n(2.0), t("DYFI"), n(4.56), n(12.0), n(0.3)],
        vec![t("Z2"), n(1.5), n(2.5), t("DYFI"), n(3.0), n(3.0), n(0.45)],
    ]
}
