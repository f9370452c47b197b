//! The color palette: a breakpoint table plus the query side.

use std::path::Path;

use tracing::debug;

use super::breakpoints::{check_domain, BreakpointTable, Rgb, Segments};
use super::colormap::{from_rgba255, to_rgba8, Colormap, Rgba, TRANSPARENT};
use super::presets::{find_preset, preset_names};
use crate::error::{ImpactError, Result};

/// Name given to palettes that do not carry one
pub const DEFAULT_PALETTE_NAME: &str = "generic";

/// Maps data values onto interpolated RGBA colors.
///
/// `vmin`/`vmax` start as the breakpoint table's domain but can be moved
/// afterwards with [`ColorPalette::set_vmin`] and [`ColorPalette::set_vmax`].
/// Moving them only changes how raw values are normalized; the channel
/// segments keep the shape they were built with, so one palette can be
/// stretched over a different data range.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    name: String,
    table: BreakpointTable,
    segments: Segments,
    nan_color: Option<Rgba>,
    vmin: f64,
    vmax: f64,
}

impl ColorPalette {
    /// Build a palette from parallel sequences of interval bounds and colors.
    ///
    /// Colors are given in `0..=255`. `nan_color` is an RGBA quadruplet in
    /// `0..=255` returned for NaN inputs.
    pub fn new(
        name: &str,
        z0: &[f64],
        z1: &[f64],
        rgb0: &[Rgb],
        rgb1: &[Rgb],
        nan_color: Option<[f64; 4]>,
    ) -> Result<Self> {
        let table = BreakpointTable::from_columns(z0, z1, rgb0, rgb1)?;
        Self::from_table(name, table, nan_color)
    }

    /// Build a palette from an existing breakpoint table
    pub fn from_table(name: &str, table: BreakpointTable, nan_color: Option<[f64; 4]>) -> Result<Self> {
        let segments = table.segments()?;
        debug!(
            palette = name,
            intervals = table.len(),
            vmin = table.vmin(),
            vmax = table.vmax(),
            "Built color palette"
        );

        Ok(Self {
            name: name.to_string(),
            vmin: table.vmin(),
            vmax: table.vmax(),
            table,
            segments,
            nan_color: nan_color.map(from_rgba255),
        })
    }

    /// Build one of the registered presets (see [`ColorPalette::presets`])
    pub fn from_preset(name: &str) -> Result<Self> {
        let preset = find_preset(name).ok_or_else(|| ImpactError::UnknownPreset {
            name: name.to_string(),
            available: preset_names().join(", "),
        })?;
        Self::from_table(preset.name, preset.table()?, Some(preset.nan_color))
    }

    /// Load a palette from a whitespace-delimited palette file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Read palette file");
        super::file::parse_palette(&text)
    }

    /// Names of the built-in presets
    pub fn presets() -> Vec<&'static str> {
        preset_names()
    }

    /// Palette name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The breakpoint table this palette was built from
    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// The per-channel interpolation rows
    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    /// Color returned for NaN inputs, in `[0, 1]`
    pub fn nan_color(&self) -> Option<Rgba> {
        self.nan_color
    }

    /// Lower bound used for normalization
    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Upper bound used for normalization
    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Move the lower normalization bound without rebuilding the segments
    pub fn set_vmin(&mut self, value: f64) {
        self.vmin = value;
    }

    /// Move the upper normalization bound without rebuilding the segments
    pub fn set_vmax(&mut self, value: f64) {
        self.vmax = value;
    }

    /// Normalize a raw data value with the current bounds
    pub fn normalize(&self, value: f64) -> Result<f64> {
        check_domain(self.vmin, self.vmax)?;
        Ok((value - self.vmin) / (self.vmax - self.vmin))
    }

    /// RGBA color, channels in `[0, 1]`, for a raw data value.
    ///
    /// NaN values yield the NaN color (transparent black when none was
    /// given). Values outside the domain clamp to the boundary colors.
    pub fn color_for(&self, value: f64) -> Result<Rgba> {
        let t = self.normalize(value)?;
        Ok(self.map_normalized(t))
    }

    /// Same as [`ColorPalette::color_for`] with 8-bit channels
    pub fn color_for_u8(&self, value: f64) -> Result<[u8; 4]> {
        self.color_for(value).map(to_rgba8)
    }
}

impl Colormap for ColorPalette {
    fn map_normalized(&self, value: f64) -> Rgba {
        if value.is_nan() {
            return self.nan_color.unwrap_or(TRANSPARENT);
        }
        self.segments.sample(value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
