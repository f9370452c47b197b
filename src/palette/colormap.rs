//! The `Colormap` trait and RGBA helpers.

/// RGBA color with every channel in `[0, 1]`
pub type Rgba = [f64; 4];

/// Fully transparent black
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];

/// A color scale over the unit interval
pub trait Colormap: Send + Sync {
    /// Color at `t`, where `0.0` and `1.0` are the ends of the scale
    fn map_normalized(&self, t: f64) -> Rgba;

    /// Color of `value` on the range `lo..=hi`.
    ///
    /// An empty or inverted range maps every value as NaN.
    fn map(&self, value: f64, lo: f64, hi: f64) -> Rgba {
        let t = if hi > lo {
            (value - lo) / (hi - lo)
        } else {
            f64::NAN
        };
        self.map_normalized(t)
    }

    /// Display name
    fn name(&self) -> &str;
}

/// Linear interpolation between two channel values
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Scale an RGBA color in `[0, 1]` to 8-bit channels
pub fn to_rgba8(color: Rgba) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Scale an RGBA color given in `0..=255` channels down to `[0, 1]`
pub fn from_rgba255(color: [f64; 4]) -> Rgba {
    color.map(|c| c / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gray;

    impl Colormap for Gray {
        fn map_normalized(&self, t: f64) -> Rgba {
            if t.is_nan() {
                return TRANSPARENT;
            }
            let v = t.clamp(0.0, 1.0);
            [v, v, v, 1.0]
        }

        fn name(&self) -> &str {
            "gray"
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 1.0, 0.5), 0.5);
        assert_eq!(lerp(0.2, 0.2, 0.9), 0.2);
        assert!((lerp(1.0, 0.0, 0.25) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_default_map_normalizes() {
        assert_eq!(Gray.map(5.0, 0.0, 10.0), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(Gray.map(3.0, 1.0, 1.0), TRANSPARENT);
        assert_eq!(Gray.map(3.0, 2.0, 1.0), TRANSPARENT);
    }

    #[test]
    fn test_rgba8_conversion() {
        assert_eq!(to_rgba8([1.0, 0.0, 0.5, 1.0]), [255, 0, 128, 255]);
        assert_eq!(to_rgba8([2.0, -1.0, 0.0, 0.0]), [255, 0, 0, 0]);
        assert_eq!(from_rgba255([255.0, 0.0, 51.0, 255.0]), [1.0, 0.0, 0.2, 1.0]);
    }
}
