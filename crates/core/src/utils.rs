//! Miscellaneous routines shared by the layout stages.
//!
//! Provides:
//! - Geometric aliases and the `HasBBox` trait
//! - Float helpers (total-order comparison, range gaps)
//! - Order statistics (median, weighted median)

use std::cmp::Ordering;

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// A rectangle defined by (x0, y0, x1, y1) where (x0, y0) is the top-left
/// corner and (x1, y1) the bottom-right corner.
pub type Rect = (f64, f64, f64, f64);

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }

    fn xmid(&self) -> f64 {
        (self.x0() + self.x1()) / 2.0
    }

    fn ymid(&self) -> f64 {
        (self.y0() + self.y1()) / 2.0
    }
}

/// Returns the smallest rectangle containing every rectangle in `rects`,
/// or `None` for an empty input.
pub fn union_rects<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
    let mut iter = rects.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |acc, r| {
        (acc.0.min(r.0), acc.1.min(r.1), acc.2.max(r.2), acc.3.max(r.3))
    }))
}

/// Horizontal gap between the ranges `[a0, a1]` and `[b0, b1]`.
/// Returns 0 if they overlap or touch.
#[inline]
pub fn range_gap(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (b0 - a1).max(a0 - b1).max(0.0)
}

/// Total order over f64 for sort keys. Inputs are validated finite before they
/// reach the layout stages, so NaN never participates.
#[inline]
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Median of `values` (lower-upper mean for even counts).
/// Returns `None` when `values` is empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| cmp_f64(*a, *b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Weighted median of `(value, weight)` pairs.
///
/// Returns the smallest value at which the cumulative weight reaches half of
/// the total. Non-positive weights count as zero; when every weight is zero
/// the plain median is used instead.
pub fn weighted_median(samples: &[(f64, f64)]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= EPSILON {
        let values: Vec<f64> = samples.iter().map(|(v, _)| *v).collect();
        return median(&values);
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| cmp_f64(a.0, b.0));

    let half = total / 2.0;
    let mut acc = 0.0;
    for (value, weight) in &sorted {
        acc += weight.max(0.0);
        if acc >= half - EPSILON {
            return Some(*value);
        }
    }
    sorted.last().map(|(v, _)| *v)
}
