//! Color palettes for scalar data.
//!
//! A [`ColorPalette`] is built from a [`BreakpointTable`] of intervals, each
//! with a start and end color, and answers `value -> color` queries by
//! piecewise-linear interpolation. Palettes come from explicit arrays, a
//! built-in preset or a palette text file.

pub mod breakpoints;
pub mod builder;
pub mod colormap;
pub mod file;
pub mod presets;

pub use breakpoints::{Breakpoint, BreakpointTable, ChannelSegments, Rgb, SegmentRow, Segments};
pub use builder::{ColorPalette, DEFAULT_PALETTE_NAME};
pub use colormap::{to_rgba8, Colormap, Rgba};
pub use file::{format_palette, parse_palette};
pub use presets::{find_preset, preset_names, Preset, MMI, POP, PRESETS};
