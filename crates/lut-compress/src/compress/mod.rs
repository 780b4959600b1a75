//! Palette compression
//!
//! Reduces a dense palette to the control points needed to reproduce it by
//! linear interpolation within a per-channel tolerance. The four channels
//! share one index axis, so a single set of breakpoints has to satisfy all
//! of them at once.
//!
//! A segment `[lo, hi]` is acceptable when every interior index is within
//! tolerance of the straight line through the palette values at `lo` and
//! `hi`, on every channel against that channel's own bound. Deviations are
//! compared in exact integer arithmetic, scaled by the segment length, so no
//! rounding can hide an error.
//!
//! The retained nodes are the shortest chain of acceptable segments from 0 to
//! 255, found by a forward pass over the 256 positions. Any node set that
//! satisfies the tolerance is such a chain, so the result is never larger
//! than one: re-compressing a reconstruction cannot grow it, and loosening
//! the tolerance cannot either. Among chains of equal length the earliest
//! predecessor wins at every position, which keeps the output deterministic.

mod control_points;
mod error;
mod tolerance;

pub use control_points::{ControlPoint, ControlPointSet};
pub use error::{CompressError, ControlPointError};
pub use tolerance::{Tolerance, DEFAULT_TOLERANCE};

use control_points::scaled_deviation;

use crate::palette::{Channel, DensePalette, PALETTE_LEN};

/// Compress a validated palette.
///
/// The result always contains positions 0 and 255, stores palette values
/// verbatim at every retained position, and reproduces every index within
/// `tolerance` on every channel. No node set satisfying the tolerance is
/// smaller.
///
/// # Example
///
/// ```
/// use lut_compress::{compress, DensePalette, Rgba, Tolerance};
///
/// let samples: Vec<Rgba> = (0..=255u8).map(|v| Rgba::new(v, v, v, v)).collect();
/// let palette = DensePalette::new("linear", samples).unwrap();
///
/// let set = compress(&palette, Tolerance::uniform(0));
/// assert_eq!(set.positions(), vec![0, 255]);
/// ```
pub fn compress(palette: &DensePalette, tolerance: Tolerance) -> ControlPointSet {
    // fewest[k]: node count of the shortest acceptable chain from 0 ending at k
    let mut fewest = [usize::MAX; PALETTE_LEN];
    let mut previous = [0usize; PALETTE_LEN];
    fewest[0] = 1;

    for hi in 1..PALETTE_LEN {
        for lo in 0..hi {
            // Adjacent positions always fit, so fewest[lo] is already finite.
            let count = fewest[lo] + 1;
            if count < fewest[hi] && segment_fits(palette, lo, hi, tolerance) {
                fewest[hi] = count;
                previous[hi] = lo;
            }
        }
    }

    let mut at = PALETTE_LEN - 1;
    let mut chain = vec![at];
    while at > 0 {
        at = previous[at];
        chain.push(at);
    }
    chain.reverse();

    let points = chain
        .into_iter()
        .map(|i| ControlPoint::new(i as u8, palette.get(i)))
        .collect();
    ControlPointSet::from_sorted(points)
}

/// Compress a raw `256 x [R, G, B, A]` integer matrix.
///
/// # Errors
///
/// - [`CompressError::InvalidTolerance`] if `tolerance` is negative
/// - [`CompressError::InvalidPalette`] if the matrix is not 256 rows or holds
///   a value outside `0..=255`
pub fn compress_rows(rows: &[[i64; 4]], tolerance: i64) -> Result<ControlPointSet, CompressError> {
    let tolerance = Tolerance::new(tolerance)?;
    let palette = DensePalette::from_rows("", rows)?;
    Ok(compress(&palette, tolerance))
}

/// Whether the endpoints of `[lo, hi]` reproduce every index inside it.
fn segment_fits(palette: &DensePalette, lo: usize, hi: usize, tolerance: Tolerance) -> bool {
    if hi - lo < 2 {
        return true;
    }

    let start = ControlPoint::new(lo as u8, palette.get(lo));
    let end = ControlPoint::new(hi as u8, palette.get(hi));
    let span = (hi - lo) as i64;
    let limits = Channel::ALL.map(|c| i64::from(tolerance.get(c)) * span);

    (lo + 1..hi).all(|i| {
        scaled_deviation(start, end, i, palette.get(i))
            .iter()
            .zip(limits.iter())
            .all(|(d, l)| d <= l)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgba;

    fn palette_from(name: &str, f: impl Fn(usize) -> Rgba) -> DensePalette {
        DensePalette::new(name, (0..PALETTE_LEN).map(f).collect()).unwrap()
    }

    fn linear_rows() -> Vec<[i64; 4]> {
        (0..256).map(|v| [v, v, v, v]).collect()
    }

    #[test]
    fn test_linear_palette_needs_only_endpoints() {
        for tol in [0, 1, 2, 50] {
            let set = compress_rows(&linear_rows(), tol).unwrap();
            assert_eq!(set.positions(), vec![0, 255], "tolerance {tol}");
        }
    }

    #[test]
    fn test_uniform_palette_needs_only_endpoints() {
        let palette = palette_from("flat", |_| Rgba::new(9, 8, 7, 6));
        for tol in [0, 2, 50] {
            let set = compress(&palette, Tolerance::uniform(tol));
            assert_eq!(set.len(), 2);
            assert_eq!(set.points()[0].color, Rgba::new(9, 8, 7, 6));
        }
    }

    #[test]
    fn test_single_spike_is_kept() {
        let palette = palette_from("spike", |i| {
            if i == 100 {
                Rgba::new(0, 0, 50, 0)
            } else {
                Rgba::new(0, 0, 0, 0)
            }
        });
        let set = compress(&palette, Tolerance::uniform(2));
        // Spike plus its two neighbours pin the flat segments back to zero.
        assert_eq!(set.positions(), vec![0, 99, 100, 101, 255]);
        assert!(set.satisfies(&palette, Tolerance::uniform(2)));
    }

    #[test]
    fn test_small_spike_within_tolerance_is_dropped() {
        let palette = palette_from("bump", |i| {
            if i == 100 {
                Rgba::new(2, 0, 0, 0)
            } else {
                Rgba::new(0, 0, 0, 0)
            }
        });
        let set = compress(&palette, Tolerance::uniform(2));
        assert_eq!(set.positions(), vec![0, 255]);
    }

    #[test]
    fn test_step_palette_keeps_the_edge() {
        let palette = palette_from("step", |i| {
            if i < 128 {
                Rgba::new(10, 20, 30, 40)
            } else {
                Rgba::new(200, 210, 220, 230)
            }
        });
        let set = compress(&palette, Tolerance::uniform(2));
        let positions = set.positions();
        assert!(positions.contains(&127));
        assert!(positions.contains(&128));
        assert!(set.satisfies(&palette, Tolerance::uniform(2)));
    }

    #[test]
    fn test_segment_fits_uses_exact_bound() {
        // Index 1 sits 1.5 off the line from 0 to 3 at index 2.
        let palette = palette_from("kink", |i| match i {
            2 => Rgba::new(3, 0, 0, 0),
            _ => Rgba::new(0, 0, 0, 0),
        });
        assert!(segment_fits(&palette, 0, 1, Tolerance::uniform(0)));
        assert!(!segment_fits(&palette, 0, 2, Tolerance::uniform(1)));
        assert!(segment_fits(&palette, 0, 2, Tolerance::uniform(2)));
    }

    #[test]
    fn test_loose_channel_peak_takes_no_node() {
        // The alpha bump is inside alpha's own bound; only the red spike needs nodes.
        let palette = palette_from("bumps", |i| match i {
            50 => Rgba::new(0, 0, 0, 40),
            200 => Rgba::new(5, 0, 0, 0),
            _ => Rgba::new(0, 0, 0, 0),
        });
        let tolerance = Tolerance::per_channel([1, 0, 0, 50]);
        let set = compress(&palette, tolerance);
        assert_eq!(set.positions(), vec![0, 199, 200, 201, 255]);
        assert!(set.satisfies(&palette, tolerance));
    }

    #[test]
    fn test_equal_length_chains_take_earliest_predecessor() {
        // A knee at 100: at tolerance 1 a middle node at 99, 100 or 101 all work.
        let palette = palette_from("knee", |i| {
            let v = i.saturating_sub(100) as u8;
            Rgba::new(v, 0, 0, 0)
        });
        let set = compress(&palette, Tolerance::uniform(1));
        assert_eq!(set.positions(), vec![0, 99, 255]);
        assert_eq!(set, compress(&palette, Tolerance::uniform(1)));

        let exact = compress(&palette, Tolerance::uniform(0));
        assert_eq!(exact.positions(), vec![0, 100, 255]);
    }

    #[test]
    fn test_per_channel_tolerance_is_respected() {
        // Alpha wobbles by 3, colour channels are flat.
        let palette = palette_from("wobble", |i| Rgba::new(0, 0, 0, if i % 2 == 1 { 3 } else { 0 }));
        let loose_alpha = compress(&palette, Tolerance::per_channel([0, 0, 0, 3]));
        assert_eq!(loose_alpha.len(), 2);

        let tight_alpha = compress(&palette, Tolerance::per_channel([3, 3, 3, 2]));
        assert!(tight_alpha.len() > 2);
        assert!(tight_alpha.satisfies(&palette, Tolerance::per_channel([3, 3, 3, 2])));
    }

    #[test]
    fn test_alternating_extremes_at_zero_tolerance_keeps_every_index() {
        let palette = palette_from("zigzag", |i| {
            let v = if i % 2 == 0 { 0 } else { 255 };
            Rgba::new(v, v, v, 255)
        });
        let set = compress(&palette, Tolerance::uniform(0));
        assert_eq!(set.len(), PALETTE_LEN);
    }

    #[test]
    fn test_values_copied_verbatim() {
        let palette = palette_from("wave", |i| {
            let v = ((i as f64 / 20.0).sin() * 120.0 + 128.0) as u8;
            Rgba::new(v, 255 - v, v / 2, 200)
        });
        let set = compress(&palette, Tolerance::uniform(1));
        for p in set.points() {
            assert_eq!(p.color, palette.get(usize::from(p.position)));
        }
    }

    #[test]
    fn test_compress_rows_rejects_short_matrix() {
        let rows = vec![[0, 0, 0, 0]; 255];
        assert!(matches!(
            compress_rows(&rows, 2),
            Err(CompressError::InvalidPalette(_))
        ));
    }

    #[test]
    fn test_compress_rows_rejects_negative_tolerance() {
        assert_eq!(
            compress_rows(&linear_rows(), -1),
            Err(CompressError::InvalidTolerance(-1))
        );
    }

    #[test]
    fn test_compress_rows_rejects_out_of_range_value() {
        let mut rows = linear_rows();
        rows[200][0] = 300;
        assert!(matches!(
            compress_rows(&rows, 2),
            Err(CompressError::InvalidPalette(_))
        ));
    }
}
