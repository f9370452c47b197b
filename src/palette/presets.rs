//! Built-in palettes.
//!
//! The registry is a compile-time table; nothing here is mutable.

use super::breakpoints::{BreakpointTable, Rgb};
use crate::error::Result;

/// Static description of a named palette
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub z0: &'static [f64],
    pub z1: &'static [f64],
    pub rgb0: &'static [Rgb],
    pub rgb1: &'static [Rgb],
    /// RGBA in `0..=255`
    pub nan_color: [f64; 4],
}

impl Preset {
    /// Build the breakpoint table for this preset
    pub fn table(&self) -> Result<BreakpointTable> {
        BreakpointTable::from_columns(self.z0, self.z1, self.rgb0, self.rgb1)
    }
}

/// Modified Mercalli Intensity, white through blue and yellow to dark red
pub const MMI: Preset = Preset {
    name: "mmi",
    z0: &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
    z1: &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
    rgb0: &[
        [255.0, 255.0, 255.0],
        [255.0, 255.0, 255.0],
        [191.0, 204.0, 255.0],
        [160.0, 230.0, 255.0],
        [128.0, 255.0, 255.0],
        [122.0, 255.0, 147.0],
        [255.0, 255.0, 0.0],
        [255.0, 200.0, 0.0],
        [255.0, 145.0, 0.0],
        [255.0, 0.0, 0.0],
    ],
    rgb1: &[
        [255.0, 255.0, 255.0],
        [191.0, 204.0, 255.0],
        [160.0, 230.0, 255.0],
        [128.0, 255.0, 255.0],
        [122.0, 255.0, 147.0],
        [255.0, 255.0, 0.0],
        [255.0, 200.0, 0.0],
        [255.0, 145.0, 0.0],
        [255.0, 0.0, 0.0],
        [200.0, 0.0, 0.0],
    ],
    nan_color: [0.0, 0.0, 0.0, 0.0],
};

/// Population density, white to black in stepped gray bands
pub const POP: Preset = Preset {
    name: "pop",
    z0: &[0.0, 5.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0],
    z1: &[5.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0, 50000.0],
    rgb0: &[
        [255.0, 255.0, 255.0],
        [191.0, 191.0, 191.0],
        [159.0, 159.0, 159.0],
        [127.0, 127.0, 127.0],
        [95.0, 95.0, 95.0],
        [63.0, 63.0, 63.0],
        [31.0, 31.0, 31.0],
        [0.0, 0.0, 0.0],
    ],
    rgb1: &[
        [255.0, 255.0, 255.0],
        [191.0, 191.0, 191.0],
        [159.0, 159.0, 159.0],
        [127.0, 127.0, 127.0],
        [95.0, 95.0, 95.0],
        [63.0, 63.0, 63.0],
        [31.0, 31.0, 31.0],
        [0.0, 0.0, 0.0],
    ],
    nan_color: [0.0, 0.0, 0.0, 0.0],
};

/// All registered presets
pub const PRESETS: &[Preset] = &[MMI, POP];

/// Look up a preset by name (case-insensitive)
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Names accepted by [`find_preset`]
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}
