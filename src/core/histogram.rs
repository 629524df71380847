//! Two-dimensional histogram with numpy `histogram2d` binning rules
//!
//! Bins are uniform over the given range. Every bin is half-open `[lo, hi)`
//! except the last one on each axis, which also includes its upper edge.
//! Points outside the range, or with a non-finite coordinate, are dropped.

use super::model::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram2d {
    pub bins_x: usize,
    pub bins_y: usize,
    pub range: [[f64; 2]; 2],
    /// Row-major by x bin: `counts[i * bins_y + j]` is x bin `i`, y bin `j`
    pub counts: Vec<f64>,
    in_range: usize,
}

/// Left edge of bin `k`, computed the way `linspace` lays out bin edges
fn edge(k: usize, [lo, hi]: [f64; 2], bins: usize) -> f64 {
    lo + k as f64 * ((hi - lo) / bins as f64)
}

/// Bin index of `v` along one axis, `None` if it falls outside `[lo, hi]`
fn bin_index(v: f64, range: [f64; 2], bins: usize) -> Option<usize> {
    let [lo, hi] = range;
    if bins == 0 || !v.is_finite() || v < lo || v > hi {
        return None;
    }
    if v == hi {
        return Some(bins - 1);
    }
    let mut idx = (((v - lo) / (hi - lo) * bins as f64) as usize).min(bins - 1);
    // The scaled guess can land one bin off next to an edge; settle it
    // against the edges themselves so `v == edge(k)` always goes to bin k.
    if idx > 0 && v < edge(idx, range, bins) {
        idx -= 1;
    } else if idx + 1 < bins && v >= edge(idx + 1, range, bins) {
        idx += 1;
    }
    Some(idx)
}

impl Histogram2d {
    pub fn empty(bins_x: usize, bins_y: usize, range: [[f64; 2]; 2]) -> Self {
        Self {
            bins_x,
            bins_y,
            range,
            counts: vec![0.0; bins_x * bins_y],
            in_range: 0,
        }
    }

    /// Bin `points` into a `bins_x` by `bins_y` grid over `range`
    pub fn compute<I>(points: I, bins_x: usize, bins_y: usize, range: [[f64; 2]; 2]) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut hist = Self::empty(bins_x, bins_y, range);
        for (x, y) in points {
            hist.add(x, y);
        }
        hist
    }

    /// Count one point; returns false if it fell outside the range
    pub fn add(&mut self, x: f64, y: f64) -> bool {
        let (Some(i), Some(j)) = (
            bin_index(x, self.range[0], self.bins_x),
            bin_index(y, self.range[1], self.bins_y),
        ) else {
            return false;
        };
        self.counts[i * self.bins_y + j] += 1.0;
        self.in_range += 1;
        true
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.counts[i * self.bins_y + j]
    }

    /// Number of points that landed inside the range
    pub fn in_range(&self) -> usize {
        self.in_range
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.counts.iter().copied().fold(0.0, f64::max)
    }

    pub fn bin_width(&self) -> (f64, f64) {
        let [[x0, x1], [y0, y1]] = self.range;
        (
            (x1 - x0) / self.bins_x as f64,
            (y1 - y0) / self.bins_y as f64,
        )
    }

    /// Rescale counts into a probability density over the range.
    /// Does nothing when no point landed in range.
    pub fn normalize_density(&mut self) {
        if self.in_range == 0 {
            return;
        }
        let (dx, dy) = self.bin_width();
        let scale = 1.0 / (self.in_range as f64 * dx * dy);
        for c in &mut self.counts {
            *c *= scale;
        }
    }
}
