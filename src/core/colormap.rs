//! Log-scaled colour mapping of histogram grids
//!
//! Mirrors `imshow(H + offset, norm=LogNorm(vmin, vmax), interpolation="gaussian")`
//! closely enough for visual comparison: cells get a small offset so empty
//! bins stay representable on a log scale, a separable Gaussian blur softens
//! the grid, and the result is sampled from a perceptual colour ramp.

use serde::{Deserialize, Serialize};

use super::histogram::Histogram2d;

/// Logarithmic normalisation of positive values into `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogNorm {
    pub vmin: f64,
    pub vmax: f64,
}

impl LogNorm {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Values at or below `vmin` map to 0, at or above `vmax` to 1.
    /// Non-positive and NaN values map to 0.
    pub fn apply(&self, v: f64) -> f64 {
        if !(v > 0.0) {
            return 0.0;
        }
        let lo = self.vmin.ln();
        let hi = self.vmax.ln();
        ((v.ln() - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

/// Colour ramps available in the viewer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Inferno,
    Greys,
}

// Ten evenly spaced samples of each ramp, interpolated linearly in between
const VIRIDIS: [[u8; 3]; 10] = [
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x49, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6e, 0xce, 0x58],
    [0xb5, 0xde, 0x2b],
    [0xfd, 0xe7, 0x25],
];

const INFERNO: [[u8; 3]; 10] = [
    [0x00, 0x00, 0x04],
    [0x1b, 0x0c, 0x41],
    [0x4a, 0x0c, 0x6b],
    [0x78, 0x1c, 0x6d],
    [0xa5, 0x2c, 0x60],
    [0xcf, 0x44, 0x46],
    [0xed, 0x69, 0x25],
    [0xfb, 0x9b, 0x06],
    [0xf7, 0xd1, 0x3d],
    [0xfc, 0xff, 0xa4],
];

const GREYS: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];

impl Colormap {
    pub const ALL: &'static [Colormap] = &[Colormap::Viridis, Colormap::Inferno, Colormap::Greys];

    pub fn label(self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Inferno => "inferno",
            Colormap::Greys => "greys",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(name))
    }

    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Inferno => &INFERNO,
            Colormap::Greys => &GREYS,
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range `t` is clamped
    pub fn sample(self, t: f64) -> [u8; 3] {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - i as f64;

        let (a, b) = (stops[i], stops[i + 1]);
        let mut out = [0u8; 3];
        for c in 0..3 {
            let v = a[c] as f64 + (b[c] as f64 - a[c] as f64) * frac;
            out[c] = v.round() as u8;
        }
        out
    }
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Separable Gaussian blur of a row-major `width` x `height` grid.
///
/// Edges are clamped. `sigma <= 0` returns the grid unchanged.
pub fn gaussian_smooth(grid: &[f64], width: usize, height: usize, sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 || grid.is_empty() {
        return grid.to_vec();
    }

    let radius = (3.0 * sigma).ceil() as isize;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|k| (-(k * k) as f64 / (2.0 * sigma * sigma)).exp())
        .collect();
    let norm: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= norm);

    let clamp = |v: isize, len: usize| v.clamp(0, len as isize - 1) as usize;

    // Horizontal pass
    let mut tmp = vec![0.0; grid.len()];
    for row in 0..height {
        for col in 0..width {
            let mut acc = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let c = clamp(col as isize + k as isize - radius, width);
                acc += w * grid[row * width + c];
            }
            tmp[row * width + col] = acc;
        }
    }

    // Vertical pass
    let mut out = vec![0.0; grid.len()];
    for row in 0..height {
        for col in 0..width {
            let mut acc = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let r = clamp(row as isize + k as isize - radius, height);
                acc += w * tmp[r * width + col];
            }
            out[row * width + col] = acc;
        }
    }
    out
}

/// How a histogram is turned into pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatmapStyle {
    pub colormap: Colormap,
    pub norm: LogNorm,
    pub offset: f64,
    pub sigma: f64,
}

/// 8-bit RGBA image, row 0 at the top
#[derive(Clone, Debug, PartialEq)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    #[cfg(test)]
    fn pixel(&self, col: usize, row: usize) -> [u8; 4] {
        let i = (row * self.width + col) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Render a histogram with x increasing to the right and y increasing upwards
pub fn render_heatmap(hist: &Histogram2d, style: &HeatmapStyle) -> RgbaImage {
    let (width, height) = (hist.bins_x, hist.bins_y);

    // Reorder to image layout: row-major, top row holds the highest y bin
    let mut grid = vec![0.0; width * height];
    for i in 0..width {
        for j in 0..height {
            let row = height - 1 - j;
            grid[row * width + i] = hist.get(i, j) + style.offset;
        }
    }

    let smoothed = gaussian_smooth(&grid, width, height, style.sigma);

    let mut pixels = Vec::with_capacity(width * height * 4);
    for v in smoothed {
        let [r, g, b] = style.colormap.sample(style.norm.apply(v));
        pixels.extend_from_slice(&[r, g, b, 255]);
    }

    RgbaImage {
        width,
        height,
        pixels,
    }
}
