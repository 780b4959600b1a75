//! Sparse control-point representation of a palette.
//!
//! A [`ControlPointSet`] stores an RGBA value at a strictly increasing list
//! of palette positions that always starts at 0 and ends at 255. Values at
//! any other index are obtained by linear interpolation between the two
//! neighbouring control points.

use super::error::ControlPointError;
use super::tolerance::Tolerance;
use crate::palette::{Channel, DensePalette, Rgba, PALETTE_LEN};

/// Last valid palette position.
const LAST: u8 = (PALETTE_LEN - 1) as u8;

/// One anchor of the sparse representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPoint {
    pub position: u8,
    pub color: Rgba,
}

impl ControlPoint {
    pub const fn new(position: u8, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Per-channel deviation of `actual` at index `i` from the straight line
/// between `lo` and `hi`, scaled by `hi - lo` so it stays an exact integer.
///
/// Dividing any element by `hi - lo` gives the true absolute deviation.
#[inline]
pub(crate) fn scaled_deviation(lo: ControlPoint, hi: ControlPoint, i: usize, actual: Rgba) -> [i64; 4] {
    let lo_pos = i64::from(lo.position);
    let hi_pos = i64::from(hi.position);
    let i = i as i64;
    let span = hi_pos - lo_pos;

    let mut out = [0i64; 4];
    for channel in Channel::ALL {
        let a = i64::from(lo.color.channel(channel));
        let b = i64::from(hi.color.channel(channel));
        let v = i64::from(actual.channel(channel));
        out[channel.index()] = (a * (hi_pos - i) + b * (i - lo_pos) - v * span).abs();
    }
    out
}

/// Immutable, validated set of control points.
///
/// Produced by [`compress()`](fn@crate::compress) or rebuilt from an external
/// source with [`ControlPointSet::from_points`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPointSet {
    points: Vec<ControlPoint>,
}

impl ControlPointSet {
    /// Validate and wrap an externally supplied list of points.
    ///
    /// # Errors
    ///
    /// Returns a [`ControlPointError`] if the list is empty, does not start
    /// at 0, does not end at 255, or is not strictly increasing.
    pub fn from_points(points: Vec<ControlPoint>) -> Result<Self, ControlPointError> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(f), Some(l)) => (f.position, l.position),
            _ => return Err(ControlPointError::Empty),
        };
        if first != 0 {
            return Err(ControlPointError::MissingStart(first));
        }
        if let Some(index) = points
            .windows(2)
            .position(|w| w[1].position <= w[0].position)
        {
            return Err(ControlPointError::NotIncreasing { index: index + 1 });
        }
        if last != LAST {
            return Err(ControlPointError::MissingEnd(last));
        }
        Ok(Self { points })
    }

    /// Construction path for the compressor, which upholds the invariants itself.
    pub(crate) fn from_sorted(points: Vec<ControlPoint>) -> Self {
        debug_assert!(Self::from_points(points.clone()).is_ok());
        Self { points }
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of control points (always at least 2).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positions (`I` in the NiiVue schema).
    pub fn positions(&self) -> Vec<u8> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Values of a single channel, aligned with [`ControlPointSet::positions`].
    pub fn channel(&self, channel: Channel) -> Vec<u8> {
        self.points.iter().map(|p| p.color.channel(channel)).collect()
    }

    /// Control points immediately at or around `index`.
    fn bracket(&self, index: usize) -> (ControlPoint, ControlPoint) {
        let at = self
            .points
            .partition_point(|p| usize::from(p.position) < index);
        match (self.points.get(at), at.checked_sub(1)) {
            (Some(p), _) if usize::from(p.position) == index => (*p, *p),
            (Some(hi), Some(lo)) => (self.points[lo], *hi),
            (Some(p), None) => (*p, *p),
            (None, _) => {
                let last = self.points[self.points.len() - 1];
                (last, last)
            }
        }
    }

    /// Linearly interpolated value of `channel` at palette `index`.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty, which a validated set never is.
    pub fn interpolate(&self, channel: Channel, index: usize) -> f64 {
        let (lo, hi) = self.bracket(index);
        let a = f64::from(lo.color.channel(channel));
        if lo.position == hi.position {
            return a;
        }
        let b = f64::from(hi.color.channel(channel));
        let offset = index as f64 - f64::from(lo.position);
        let span = f64::from(hi.position) - f64::from(lo.position);
        a + (b - a) * offset / span
    }

    /// Expand back into a dense palette, rounding each interpolated value.
    pub fn reconstruct(&self, name: &str) -> DensePalette {
        let samples = (0..PALETTE_LEN)
            .map(|i| {
                let mut bytes = [0u8; 4];
                for channel in Channel::ALL {
                    bytes[channel.index()] =
                        self.interpolate(channel, i).round().clamp(0.0, 255.0) as u8;
                }
                Rgba::from_array(bytes)
            })
            .collect();
        DensePalette::from_trusted(name, samples)
    }

    /// Largest absolute per-channel error against `palette`, in R, G, B, A order.
    pub fn max_error(&self, palette: &DensePalette) -> [f64; 4] {
        let mut worst = [0.0f64; 4];
        for (i, actual) in palette.samples().iter().enumerate() {
            for channel in Channel::ALL {
                let err = (self.interpolate(channel, i) - f64::from(actual.channel(channel))).abs();
                let slot = &mut worst[channel.index()];
                if err > *slot {
                    *slot = err;
                }
            }
        }
        worst
    }

    /// Exact check that every index of `palette` is reproduced within `tolerance`.
    pub fn satisfies(&self, palette: &DensePalette, tolerance: Tolerance) -> bool {
        self.points.windows(2).all(|w| {
            let (lo, hi) = (w[0], w[1]);
            let span = i64::from(hi.position) - i64::from(lo.position);
            (usize::from(lo.position)..=usize::from(hi.position)).all(|i| {
                let dev = scaled_deviation(lo, hi, i, palette.get(i));
                Channel::ALL
                    .iter()
                    .all(|&c| dev[c.index()] <= i64::from(tolerance.get(c)) * span)
            })
        })
    }
}
