//! ShakeMap station XML writer.
//!
//! ```xml
//! <shakemap-data code_version="3.5" map_version="3">
//!   <stationlist created="1600000000" reference="...">
//!     <station code="CI.ABC" lat="34.0500" lon="-118.2500" ...>
//!       <comp name="HHE" orientation="h">
//!         <pga flag="0" value="0.1235"/>
//!       </comp>
//!     </station>
//!   </stationlist>
//! </shakemap-data>
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use tracing::info;

use super::fields::{format_fixed, render_fields, XML_ATTRIBUTES};
use super::frame::StationTable;
use super::records::{collect_stations, ChannelRecord, StationRecord};
use crate::config::ExportConfig;
use crate::error::Result;

/// Write the station XML document to any writer
pub fn write_xml_to<W: Write>(
    table: &StationTable,
    inner: W,
    reference: Option<&str>,
    export: &ExportConfig,
) -> Result<()> {
    let stations = collect_stations(table)?;
    let mut writer = Writer::new_with_indent(inner, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = BytesStart::new("shakemap-data").with_attributes([
        ("code_version", export.code_version.as_str()),
        ("map_version", export.map_version.as_str()),
    ]);
    writer.write_event(Event::Start(root))?;

    let created = export.timestamp_or_now().to_string();
    let mut list = BytesStart::new("stationlist");
    list.push_attribute(("created", created.as_str()));
    if let Some(reference) = reference {
        list.push_attribute(("reference", reference));
    }
    writer.write_event(Event::Start(list))?;

    for station in &stations {
        write_station(&mut writer, table, station)?;
    }

    writer.write_event(Event::End(BytesEnd::new("stationlist")))?;
    writer.write_event(Event::End(BytesEnd::new("shakemap-data")))?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_station<W: Write>(
    writer: &mut Writer<W>,
    table: &StationTable,
    station: &StationRecord,
) -> Result<()> {
    let lat = format_fixed(station.lat, 4);
    let lon = format_fixed(station.lon, 4);
    let fields = render_fields(table, station.row, XML_ATTRIBUTES)?;

    let mut element = BytesStart::new("station");
    element.push_attribute(("code", station.code.as_str()));
    element.push_attribute(("lat", lat.as_str()));
    element.push_attribute(("lon", lon.as_str()));
    for (key, value) in &fields {
        element.push_attribute((*key, value.as_str()));
    }

    if station.channels.is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    for channel in &station.channels {
        write_component(writer, channel)?;
    }
    writer.write_event(Event::End(BytesEnd::new("station")))?;
    Ok(())
}

fn write_component<W: Write>(writer: &mut Writer<W>, channel: &ChannelRecord) -> Result<()> {
    let comp = BytesStart::new("comp").with_attributes([
        ("name", channel.name.as_str()),
        ("orientation", channel.orientation.code()),
    ]);

    if channel.amplitudes.is_empty() {
        writer.write_event(Event::Empty(comp))?;
        return Ok(());
    }

    writer.write_event(Event::Start(comp))?;
    for amplitude in &channel.amplitudes {
        let value = format_fixed(amplitude.value, 4);
        let element = BytesStart::new(amplitude.name.as_str()).with_attributes([
            ("flag", amplitude.flag.as_str()),
            ("value", value.as_str()),
        ]);
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new("comp")))?;
    Ok(())
}

/// Render the station XML document as a string
pub fn to_xml_string(
    table: &StationTable,
    reference: Option<&str>,
    export: &ExportConfig,
) -> Result<String> {
    let mut out = Vec::new();
    write_xml_to(table, &mut out, reference, export)?;
    String::from_utf8(out).map_err(|e| crate::error::ImpactError::parse(e.to_string()))
}

/// Write the station XML document to `path`, replacing any existing file
pub fn write_xml(
    table: &StationTable,
    path: impl AsRef<Path>,
    reference: Option<&str>,
    export: &ExportConfig,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_xml_to(table, &mut writer, reference, export)?;
    writer.flush()?;
    info!(path = %path.display(), stations = table.len(), "Wrote station XML");
    Ok(())
}
