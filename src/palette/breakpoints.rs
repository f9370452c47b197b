//! Breakpoint tables and the piecewise-linear channel segments built from them.
//!
//! A palette is described by an ordered list of intervals, each carrying a
//! start and an end color. Building a palette normalizes the interval starts
//! into `[0, 1]` and produces, for each of the red, green and blue channels,
//! a list of rows `(x, arriving, leaving)`:
//!
//! - row `0` sits at the first interval start and leaves with `rgb0[0]`
//! - row `i` (for `1..N`) sits at `z0[i]`, arrives with `rgb1[i - 1]` and
//!   leaves with `rgb0[i]`
//! - row `N` sits at the end of the last interval and arrives with `rgb1[N - 1]`
//!
//! Between two adjacent rows the channel is interpolated linearly from the
//! lower row's leaving value to the upper row's arriving value.

use serde::{Deserialize, Serialize};

use crate::error::{ImpactError, Result};

/// RGB triplet with channels in `0..=255`
pub type Rgb = [f64; 3];

/// One interval of a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Start of the interval in data units
    pub z0: f64,
    /// End of the interval in data units
    pub z1: f64,
    /// Color at the start of the interval
    pub rgb0: Rgb,
    /// Color at the end of the interval
    pub rgb1: Rgb,
}

/// Ordered breakpoint intervals plus the derived data domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointTable {
    intervals: Vec<Breakpoint>,
    vmin: f64,
    vmax: f64,
}

impl BreakpointTable {
    /// Build a table from four parallel sequences.
    ///
    /// The domain is `min(z0)` to `max(z1)`. A `z0` above `max(z1)` is not
    /// folded into the domain and will be rejected when segments are built.
    pub fn from_columns(z0: &[f64], z1: &[f64], rgb0: &[Rgb], rgb1: &[Rgb]) -> Result<Self> {
        let n = z0.len();
        if z1.len() != n || rgb0.len() != n || rgb1.len() != n {
            return Err(ImpactError::LengthMismatch {
                z0: z0.len(),
                z1: z1.len(),
                rgb0: rgb0.len(),
                rgb1: rgb1.len(),
            });
        }

        let intervals = (0..n)
            .map(|i| Breakpoint {
                z0: z0[i],
                z1: z1[i],
                rgb0: rgb0[i],
                rgb1: rgb1[i],
            })
            .collect();

        Self::new(intervals)
    }

    /// Build a table from already-paired intervals
    pub fn new(intervals: Vec<Breakpoint>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(ImpactError::InvalidBreakpoints {
                message: "at least one interval is required".to_string(),
            });
        }

        let vmin = intervals
            .iter()
            .map(|b| b.z0)
            .fold(f64::INFINITY, f64::min);
        let vmax = intervals
            .iter()
            .map(|b| b.z1)
            .fold(f64::NEG_INFINITY, f64::max);

        check_domain(vmin, vmax)?;

        Ok(Self {
            intervals,
            vmin,
            vmax,
        })
    }

    /// The intervals, in input order
    pub fn intervals(&self) -> &[Breakpoint] {
        &self.intervals
    }

    /// Number of intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Minimum of all interval starts
    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Maximum of all interval ends
    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Map a data value into the table's normalized domain
    pub fn normalize(&self, z: f64) -> f64 {
        (z - self.vmin) / (self.vmax - self.vmin)
    }

    /// Build the per-channel interpolation rows
    pub fn segments(&self) -> Result<Segments> {
        let n = self.intervals.len();
        let mut xs = Vec::with_capacity(n + 1);
        xs.extend(self.intervals.iter().map(|b| self.normalize(b.z0)));
        xs.push(self.normalize(self.intervals[n - 1].z1));

        validate_positions(&xs)?;

        let channel = |c: usize| {
            let rows = xs
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    let (arriving, leaving) = if i == 0 {
                        let first = self.intervals[0].rgb0[c];
                        (first, first)
                    } else if i == n {
                        let last = self.intervals[n - 1].rgb1[c];
                        (last, last)
                    } else {
                        (self.intervals[i - 1].rgb1[c], self.intervals[i].rgb0[c])
                    };
                    SegmentRow {
                        x,
                        arriving: arriving / 255.0,
                        leaving: leaving / 255.0,
                    }
                })
                .collect();
            ChannelSegments { rows }
        };

        Ok(Segments {
            red: channel(0),
            green: channel(1),
            blue: channel(2),
        })
    }
}

/// Fail unless `vmin < vmax` with both finite
pub(crate) fn check_domain(vmin: f64, vmax: f64) -> Result<()> {
    let span = vmax - vmin;
    if !span.is_finite() || span <= 0.0 {
        return Err(ImpactError::DegenerateDomain { vmin, vmax });
    }
    Ok(())
}

/// Tolerance used when checking the normalized end points
const POSITION_EPSILON: f64 = 1e-9;

fn validate_positions(xs: &[f64]) -> Result<()> {
    if let Some(i) = xs.windows(2).position(|w| w[1] < w[0]) {
        return Err(ImpactError::InvalidBreakpoints {
            message: format!(
                "normalized positions must be non-decreasing, found {} after {}",
                xs[i + 1],
                xs[i]
            ),
        });
    }

    let first = xs[0];
    let last = xs[xs.len() - 1];
    if first.abs() > POSITION_EPSILON || (last - 1.0).abs() > POSITION_EPSILON {
        return Err(ImpactError::InvalidBreakpoints {
            message: format!(
                "normalized positions must start at 0 and end at 1, got {} and {}",
                first, last
            ),
        });
    }

    Ok(())
}

/// One control row of a channel: a position with the values on either side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRow {
    /// Normalized position in `[0, 1]`
    pub x: f64,
    /// Value approached from below, in `[0, 1]`
    pub arriving: f64,
    /// Value departed toward above, in `[0, 1]`
    pub leaving: f64,
}

/// Piecewise-linear function for a single color channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSegments {
    rows: Vec<SegmentRow>,
}

impl ChannelSegments {
    /// The control rows, ordered by position
    pub fn rows(&self) -> &[SegmentRow] {
        &self.rows
    }

    /// Sample the channel at normalized position `t`.
    ///
    /// Positions outside `[0, 1]` clamp to the boundary colors. Exactly on an
    /// interior breakpoint the leaving value wins.
    pub fn sample(&self, t: f64) -> f64 {
        let first = &self.rows[0];
        let last = &self.rows[self.rows.len() - 1];

        if t <= first.x {
            return first.leaving;
        }
        if t >= last.x {
            return last.arriving;
        }

        // rows[k].x <= t < rows[k + 1].x
        let k = self.rows.partition_point(|r| r.x <= t) - 1;
        let lo = &self.rows[k];
        let hi = &self.rows[k + 1];
        let frac = (t - lo.x) / (hi.x - lo.x);
        super::colormap::lerp(lo.leaving, hi.arriving, frac)
    }
}

/// Red, green and blue channel functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segments {
    pub red: ChannelSegments,
    pub green: ChannelSegments,
    pub blue: ChannelSegments,
}

impl Segments {
    /// Sample all three channels, alpha is always 1
    pub fn sample(&self, t: f64) -> [f64; 4] {
        [
            self.red.sample(t),
            self.green.sample(t),
            self.blue.sample(t),
            1.0,
        ]
    }
}
