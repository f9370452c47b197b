//! Float and color assertions shared by the integration tests.

#![allow(dead_code)]

/// Tolerance used when none is given
pub const DEFAULT_EPSILON: f64 = 1e-9;

fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Assert `|actual - expected| <= epsilon` (default [`DEFAULT_EPSILON`])
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
    assert!(
        close(actual, expected, eps),
        "{actual} != {expected} (tolerance {eps})"
    );
}

/// Compare an RGBA color in `[0, 1]` with an opaque RGB color in `0..=255`
pub fn assert_color_255(actual: [f64; 4], expected_255: [f64; 3]) {
    let expected = [
        expected_255[0] / 255.0,
        expected_255[1] / 255.0,
        expected_255[2] / 255.0,
        1.0,
    ];
    assert_color_eq(actual, expected);
}

/// Compare two RGBA colors channel by channel
pub fn assert_color_eq(actual: [f64; 4], expected: [f64; 4]) {
    let differs = actual
        .iter()
        .zip(expected.iter())
        .position(|(a, e)| !close(*a, *e, DEFAULT_EPSILON));
    if let Some(channel) = differs {
        panic!("color mismatch in channel {channel}: {actual:?} vs {expected:?}");
    }
}

/// Assert that `actual` lies between `a` and `b`, in either order
pub fn assert_between(actual: f64, a: f64, b: f64) {
    let lo = a.min(b) - DEFAULT_EPSILON;
    let hi = a.max(b) + DEFAULT_EPSILON;
    assert!((lo..=hi).contains(&actual), "{actual} outside [{a}, {b}]");
}
