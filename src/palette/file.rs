//! Palette text files.
//!
//! ```text
//! # Lines beginning with '#' are comments.
//! #$nan_color: 0,0,0,0
//! #$name: test
//! Z0 R0  G0  B0  Z1  R1  G1  B1
//! 0   0   0   0   1  85  85  85
//! 1  85  85  85   2 170 170 170
//! 2 170 170 170   3 255 255 255
//! ```
//!
//! Columns are located by header name, so their order is free. Anything
//! after a `#` on a data line is ignored.

use super::breakpoints::Rgb;
use super::builder::{ColorPalette, DEFAULT_PALETTE_NAME};
use super::colormap::to_rgba8;
use crate::error::{ImpactError, Result};

const NAN_COLOR_DIRECTIVE: &str = "#$nan_color:";
const NAME_DIRECTIVE: &str = "#$name:";
const COLUMNS: [&str; 8] = ["Z0", "R0", "G0", "B0", "Z1", "R1", "G1", "B1"];

/// Parse the contents of a palette file
pub fn parse_palette(text: &str) -> Result<ColorPalette> {
    let mut nan_color = [0.0; 4];
    let mut name = DEFAULT_PALETTE_NAME.to_string();
    let mut header: Option<[usize; 8]> = None;
    let mut width = 0;

    let mut z0 = Vec::new();
    let mut z1 = Vec::new();
    let mut rgb0: Vec<Rgb> = Vec::new();
    let mut rgb1: Vec<Rgb> = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let lineno = lineno + 1;
        let line = raw.trim();

        if let Some(value) = line.strip_prefix(NAN_COLOR_DIRECTIVE) {
            nan_color = parse_nan_color(value, lineno)?;
            continue;
        }
        if let Some(value) = line.strip_prefix(NAME_DIRECTIVE) {
            name = value.trim().to_string();
            continue;
        }

        let content = match line.find('#') {
            Some(pos) => line[..pos].trim(),
            None => line,
        };
        if content.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = content.split_whitespace().collect();
        let Some(index) = header else {
            header = Some(locate_columns(&tokens, lineno)?);
            width = tokens.len();
            continue;
        };

        if tokens.len() != width {
            return Err(ImpactError::parse(format!(
                "line {}: expected {} fields, found {}",
                lineno,
                width,
                tokens.len()
            )));
        }

        let mut row = [0.0; 8];
        for (slot, &col) in row.iter_mut().zip(index.iter()) {
            *slot = tokens[col].parse::<f64>().map_err(|_| {
                ImpactError::parse(format!(
                    "line {}: '{}' is not a number",
                    lineno, tokens[col]
                ))
            })?;
        }

        z0.push(row[0]);
        rgb0.push([row[1], row[2], row[3]]);
        z1.push(row[4]);
        rgb1.push([row[5], row[6], row[7]]);
    }

    if header.is_none() {
        return Err(ImpactError::parse(format!(
            "palette has no header line ({})",
            COLUMNS.join(" ")
        )));
    }

    ColorPalette::new(&name, &z0, &z1, &rgb0, &rgb1, Some(nan_color))
}

fn parse_nan_color(value: &str, lineno: usize) -> Result<[f64; 4]> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(ImpactError::parse(format!(
            "line {}: nan_color needs 4 comma-separated values, found {}",
            lineno,
            parts.len()
        )));
    }

    let mut color = [0.0; 4];
    for (slot, part) in color.iter_mut().zip(parts) {
        *slot = part.parse::<f64>().map_err(|_| {
            ImpactError::parse(format!("line {}: bad nan_color value '{}'", lineno, part))
        })?;
    }
    Ok(color)
}

fn locate_columns(tokens: &[&str], lineno: usize) -> Result<[usize; 8]> {
    let mut index = [0; 8];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = tokens
            .iter()
            .position(|t| t.eq_ignore_ascii_case(column))
            .ok_or_else(|| {
                ImpactError::parse(format!("line {}: header is missing column {}", lineno, column))
            })?;
    }
    Ok(index)
}

/// Render a palette back into the file format read by [`parse_palette`]
pub fn format_palette(palette: &ColorPalette) -> String {
    let nan = to_rgba8(palette.nan_color().unwrap_or([0.0; 4]));

    let mut lines = vec![
        format!("{} {},{},{},{}", NAN_COLOR_DIRECTIVE, nan[0], nan[1], nan[2], nan[3]),
        format!("{} {}", NAME_DIRECTIVE, palette.name()),
        COLUMNS.join(" "),
    ];
    lines.extend(palette.table().intervals().iter().map(|b| {
        format!(
            "{} {} {} {} {} {} {} {}",
            b.z0, b.rgb0[0], b.rgb0[1], b.rgb0[2], b.z1, b.rgb1[0], b.rgb1[1], b.rgb1[2]
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
