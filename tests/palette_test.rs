//! Integration tests for color palettes.

mod common;

use common::assertions::{assert_approx_eq, assert_between, assert_color_255, assert_color_eq};
use impactkit::palette::{format_palette, ColorPalette, Colormap, Rgb, MMI, POP};
use impactkit::ImpactError;
use std::io::Write;

fn irregular() -> (Vec<f64>, Vec<f64>, Vec<Rgb>, Vec<Rgb>) {
    (
        vec![-2.0, 0.5, 0.75, 4.0],
        vec![0.5, 0.75, 4.0, 10.0],
        vec![
            [10.0, 20.0, 30.0],
            [200.0, 0.0, 50.0],
            [0.0, 255.0, 0.0],
            [90.0, 90.0, 90.0],
        ],
        vec![
            [100.0, 120.0, 130.0],
            [0.0, 0.0, 250.0],
            [255.0, 255.0, 255.0],
            [5.0, 6.0, 7.0],
        ],
    )
}

#[test]
fn test_boundary_colors_are_exact() {
    let (z0, z1, rgb0, rgb1) = irregular();
    let palette = ColorPalette::new("irregular", &z0, &z1, &rgb0, &rgb1, None).unwrap();

    assert_approx_eq(palette.vmin(), -2.0, None);
    assert_approx_eq(palette.vmax(), 10.0, None);
    assert_color_255(palette.color_for(palette.vmin()).unwrap(), rgb0[0]);
    assert_color_255(palette.color_for(palette.vmax()).unwrap(), rgb1[3]);
}

#[test]
fn test_colors_stay_within_interval() {
    let (z0, z1, rgb0, rgb1) = irregular();
    let palette = ColorPalette::new("irregular", &z0, &z1, &rgb0, &rgb1, None).unwrap();

    for i in 0..z0.len() {
        let next = if i + 1 < z0.len() { z0[i + 1] } else { z1[i] };
        for step in 1..10 {
            let v = z0[i] + (next - z0[i]) * step as f64 / 10.0;
            let color = palette.color_for(v).unwrap();
            for c in 0..3 {
                assert_between(color[c], rgb0[i][c] / 255.0, rgb1[i][c] / 255.0);
            }
        }
    }
}

#[test]
fn test_interior_breakpoint_starts_next_interval() {
    let (z0, z1, rgb0, rgb1) = irregular();
    let palette = ColorPalette::new("irregular", &z0, &z1, &rgb0, &rgb1, None).unwrap();
    assert_color_255(palette.color_for(0.75).unwrap(), rgb0[2]);
}

#[test]
fn test_mmi_preset() {
    let palette = ColorPalette::from_preset("mmi").unwrap();
    assert_color_255(palette.color_for(0.0).unwrap(), [255.0, 255.0, 255.0]);
    assert_color_255(palette.color_for(5.0).unwrap(), MMI.rgb0[5]);
    assert_color_255(palette.color_for(10.0).unwrap(), [200.0, 0.0, 0.0]);
    assert_color_eq(palette.color_for(f64::NAN).unwrap(), [0.0; 4]);
}

#[test]
fn test_pop_preset_steps() {
    let palette = ColorPalette::from_preset("pop").unwrap();
    assert_eq!(palette.vmax(), 50000.0);
    // Bands have equal start and end colors
    assert_color_255(palette.color_for(2.5).unwrap(), POP.rgb0[0]);
    assert_color_255(palette.color_for(5.0).unwrap(), POP.rgb0[1]);
    assert_color_255(palette.color_for(7500.0).unwrap(), POP.rgb0[6]);
    assert_color_255(palette.color_for(50000.0).unwrap(), [0.0, 0.0, 0.0]);
}

#[test]
fn test_length_mismatch() {
    let err = ColorPalette::new(
        "bad",
        &[0.0, 1.0, 2.0],
        &[1.0, 2.0, 3.0],
        &[[0.0; 3]; 4],
        &[[0.0; 3]; 3],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, ImpactError::LengthMismatch { .. }));
}

#[test]
fn test_unknown_preset() {
    assert!(matches!(
        ColorPalette::from_preset("nope"),
        Err(ImpactError::UnknownPreset { .. })
    ));
}

#[test]
fn test_preset_and_file_agree() {
    for name in ColorPalette::presets() {
        let preset = ColorPalette::from_preset(name).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(format_palette(&preset).as_bytes()).unwrap();
        let loaded = ColorPalette::from_file(file.path()).unwrap();

        assert_eq!(loaded.name(), name);
        let (lo, hi) = (preset.vmin(), preset.vmax());
        for i in -2..=22 {
            let v = lo + (hi - lo) * i as f64 / 20.0;
            assert_color_eq(loaded.color_for(v).unwrap(), preset.color_for(v).unwrap());
        }
        assert_color_eq(
            loaded.color_for(f64::NAN).unwrap(),
            preset.color_for(f64::NAN).unwrap(),
        );
    }
}

#[test]
fn test_from_file_directives() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "#This file is a test file for ColorPalette.\n\
         #$nan_color: 0,0,0,0\n\
         #$name: test\n\
         Z0 R0  G0  B0  Z1  R1  G1  B1\n\
         0   0   0   0   1  85  85  85\n\
         1  85  85  85   2 170 170 170\n\
         2 170 170 170   3 255 255 255\n"
    )
    .unwrap();

    let palette = ColorPalette::from_file(file.path()).unwrap();
    assert_eq!(palette.name(), "test");
    assert_eq!(Colormap::name(&palette), "test");
    let color = palette.color_for(0.5).unwrap();
    assert_approx_eq(color[0], 42.5 / 255.0, None);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ColorPalette::from_file(dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, ImpactError::Io(_)));
}

#[test]
fn test_rescaled_palette_reuses_shape() {
    let mut palette = ColorPalette::from_preset("mmi").unwrap();
    let at_five = palette.color_for(5.0).unwrap();
    palette.set_vmin(100.0);
    palette.set_vmax(200.0);
    assert_color_eq(palette.color_for(150.0).unwrap(), at_five);
    // The normalized lookup is independent of the data range
    assert_color_eq(palette.map_normalized(0.5), at_five);
}
