//! GeoJSON-like station feature collection writer.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::info;

use super::fields::{format_fixed, render_fields, JSON_PROPERTIES};
use super::frame::StationTable;
use super::records::{collect_stations, Amplitude};
use crate::config::ExportConfig;
use crate::error::Result;

#[derive(serde::Serialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    software: Software,
    process_time: i64,
    features: Vec<Feature>,
}

#[derive(serde::Serialize)]
struct Software {
    name: String,
    version: String,
}

#[derive(serde::Serialize)]
struct Feature {
    geometry: Geometry,
    properties: Properties,
    channels: BTreeMap<String, ChannelAmplitudes>,
}

#[derive(serde::Serialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<String>,
}

#[derive(serde::Serialize)]
struct ChannelAmplitudes {
    amplitudes: Vec<JsonAmplitude>,
}

#[derive(serde::Serialize)]
struct JsonAmplitude {
    name: String,
    flag: Value,
    value: String,
}

impl From<&Amplitude> for JsonAmplitude {
    fn from(a: &Amplitude) -> Self {
        // Numeric flags stay numbers, anything else is kept verbatim
        let flag = match a.flag.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(a.flag.clone()),
        };
        Self {
            name: a.name.clone(),
            flag,
            value: format_fixed(a.value, 4),
        }
    }
}

/// Ordered string map
struct Properties(Vec<(&'static str, String)>);

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn build_collection(table: &StationTable, export: &ExportConfig) -> Result<FeatureCollection> {
    let mut features = Vec::new();
    for station in collect_stations(table)? {
        let mut coordinates = vec![format_fixed(station.lat, 4), format_fixed(station.lon, 4)];
        if let Some(elev) = station.elev {
            coordinates.push(format_fixed(elev, 1));
        }

        let mut properties = vec![("code", station.short_code().to_string())];
        properties.extend(render_fields(table, station.row, JSON_PROPERTIES)?);

        let channels = station
            .channels
            .iter()
            .map(|c| {
                let amplitudes = c.amplitudes.iter().map(JsonAmplitude::from).collect();
                (c.name.clone(), ChannelAmplitudes { amplitudes })
            })
            .collect();

        features.push(Feature {
            geometry: Geometry {
                kind: "Point",
                coordinates,
            },
            properties: Properties(properties),
            channels,
        });
    }

    Ok(FeatureCollection {
        kind: "FeatureCollection",
        software: Software {
            name: export.software_name.clone(),
            version: export.software_version.clone(),
        },
        process_time: export.timestamp_or_now(),
        features,
    })
}

/// Build the feature collection as a JSON value
pub fn to_json_value(table: &StationTable, export: &ExportConfig) -> Result<Value> {
    Ok(serde_json::to_value(build_collection(table, export)?)?)
}

/// Serialize the feature collection with four-space indentation
pub fn write_json_to<W: Write>(table: &StationTable, writer: W, export: &ExportConfig) -> Result<()> {
    let collection = build_collection(table, export)?;
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    collection.serialize(&mut serializer)?;
    Ok(())
}

/// Write the feature collection to `path`, replacing any existing file
pub fn write_json(table: &StationTable, path: impl AsRef<Path>, export: &ExportConfig) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_json_to(table, &mut writer, export)?;
    writer.flush()?;
    info!(path = %path.display(), stations = table.len(), "Wrote station JSON");
    Ok(())
}
