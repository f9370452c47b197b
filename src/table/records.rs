//! Row processing shared by the JSON and XML writers.
//!
//! Turns a [`StationTable`] into one [`StationRecord`] per station:
//! network-prefixed code, coordinates and per-channel amplitudes. Rows whose
//! station code has already been seen are skipped, which collapses tables
//! that carry one row per measurement.

use std::collections::HashSet;

use tracing::debug;

use super::frame::{Layout, StationTable};
use super::imt::{legacy_name, translate_imt, OUTPUT_IMTS};
use super::schema::{is_output_channel, Orientation};
use crate::error::{ImpactError, Result};

/// One measured amplitude
#[derive(Debug, Clone, PartialEq)]
pub struct Amplitude {
    /// Legacy measurement name (`pga`, `psa03`, ...)
    pub name: String,
    /// Quality flag, `"0"` when the table has none
    pub flag: String,
    pub value: f64,
}

/// Amplitudes recorded on one channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRecord {
    pub name: String,
    pub orientation: Orientation,
    pub amplitudes: Vec<Amplitude>,
}

/// One station, ready to be serialized
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// Row of the table the station fields come from
    pub row: usize,
    /// Station code prefixed with the network id
    pub code: String,
    pub lat: f64,
    pub lon: f64,
    pub elev: Option<f64>,
    pub channels: Vec<ChannelRecord>,
}

impl StationRecord {
    /// Station code without the network prefix
    pub fn short_code(&self) -> &str {
        self.code.rsplit('.').next().unwrap_or(&self.code)
    }
}

/// Channels the writers emit, sorted by name
pub fn output_channels(table: &StationTable) -> Vec<String> {
    let mut channels: Vec<String> = table
        .channel_candidates()
        .into_iter()
        .filter(|c| is_output_channel(c))
        .collect();
    channels.sort();
    channels
}

fn text_field(table: &StationTable, row: usize, name: &str) -> String {
    table
        .field(row, name)
        .and_then(|c| c.as_text())
        .unwrap_or_default()
}

fn number_field(table: &StationTable, row: usize, name: &str) -> Result<f64> {
    match table.field(row, name) {
        Some(cell) => cell.as_number(),
        None => Ok(f64::NAN),
    }
}

/// Collect one record per distinct station code
pub fn collect_stations(table: &StationTable) -> Result<Vec<StationRecord>> {
    let channels = output_channels(table);
    let long_form = table.has_column("IMT");
    let mut seen = HashSet::new();
    let mut stations = Vec::new();

    for row in 0..table.len() {
        let station = text_field(table, row, "STATION");
        let netid = text_field(table, row, "NETID");
        let code = if station.starts_with(&netid) {
            station.clone()
        } else {
            format!("{}.{}", netid, station)
        };

        if !seen.insert(code.clone()) {
            debug!(station = %code, row = row, "Station already processed, skipping row");
            continue;
        }

        let elev = number_field(table, row, "ELEV")?;
        let channel_records = match (long_form, table.layout()) {
            (true, _) => long_form_channels(table, &station)?,
            (false, Layout::Grouped) => grouped_channels(table, row, &channels)?,
            // Flat channel columns hold no measurements
            (false, Layout::Flat) => Vec::new(),
        };

        stations.push(StationRecord {
            row,
            code,
            lat: number_field(table, row, "LAT")?,
            lon: number_field(table, row, "LON")?,
            elev: (!elev.is_nan()).then_some(elev),
            channels: channel_records,
        });
    }

    Ok(stations)
}

fn grouped_channels(
    table: &StationTable,
    row: usize,
    channels: &[String],
) -> Result<Vec<ChannelRecord>> {
    let mut records = Vec::with_capacity(channels.len());
    for channel in channels {
        let columns = table.measurements(channel);
        let mut amplitudes = Vec::new();
        for imt in OUTPUT_IMTS {
            let column = match translate_imt(imt, &columns) {
                Ok(column) => column,
                Err(ImpactError::UnresolvableMeasurementName { .. }) => {
                    debug!(channel = %channel, imt = imt, "No column for measurement");
                    continue;
                }
                Err(e) => return Err(e),
            };
            match table.get(row, channel, column)? {
                Some(value) if !value.is_nan() => amplitudes.push(Amplitude {
                    name: imt.to_string(),
                    flag: "0".to_string(),
                    value,
                }),
                _ => {}
            }
        }
        records.push(ChannelRecord {
            name: channel.to_ascii_uppercase(),
            orientation: Orientation::of_channel(channel),
            amplitudes,
        });
    }
    Ok(records)
}

/// Gather every row of `station` and group its measurements by channel
fn long_form_channels(table: &StationTable, station: &str) -> Result<Vec<ChannelRecord>> {
    let mut records: Vec<ChannelRecord> = Vec::new();
    for row in 0..table.len() {
        if text_field(table, row, "STATION") != station {
            continue;
        }

        let channel = text_field(table, row, "CHANNEL").to_ascii_uppercase();
        let imt = text_field(table, row, "IMT");
        let value = number_field(table, row, "VALUE")?;
        if value.is_nan() {
            debug!(station = station, channel = %channel, imt = %imt, "Skipping empty value");
            continue;
        }
        let flag = table
            .field(row, "FLAG")
            .and_then(|c| c.as_text())
            .unwrap_or_else(|| "0".to_string());

        let amplitude = Amplitude {
            name: legacy_name(&imt),
            flag,
            value,
        };
        match records.iter_mut().find(|r| r.name == channel) {
            Some(record) => record.amplitudes.push(amplitude),
            None => records.push(ChannelRecord {
                orientation: Orientation::of_channel(&channel),
                name: channel,
                amplitudes: vec![amplitude],
            }),
        }
    }
    Ok(records)
}
