//! Per-frame heatmap rendering for a set of datasets animated in lockstep

use tracing::trace;

use super::colormap::{render_heatmap, Colormap, HeatmapStyle, LogNorm, RgbaImage};
use super::ensemble::Ensemble;
use super::histogram::Histogram2d;
use crate::config::ViewerConfig;

/// Bins one frame of an ensemble and colours it
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    bins: usize,
    range: [[f64; 2]; 2],
    style: HeatmapStyle,
}

impl FrameRenderer {
    pub fn new(config: &ViewerConfig, colormap: Colormap) -> Self {
        Self {
            bins: config.bins,
            range: config.range(),
            style: HeatmapStyle {
                colormap,
                norm: LogNorm::new(config.vmin, config.vmax),
                offset: config.offset,
                sigma: config.sigma,
            },
        }
    }

    pub fn colormap(&self) -> Colormap {
        self.style.colormap
    }

    pub fn set_colormap(&mut self, colormap: Colormap) {
        self.style.colormap = colormap;
    }

    pub fn range(&self) -> [[f64; 2]; 2] {
        self.range
    }

    pub fn histogram(&self, ensemble: &Ensemble, frame: usize) -> Histogram2d {
        Histogram2d::compute(ensemble.frame(frame), self.bins, self.bins, self.range)
    }

    pub fn render(&self, ensemble: &Ensemble, frame: usize) -> RgbaImage {
        let hist = self.histogram(ensemble, frame);
        trace!(frame, in_range = hist.in_range(), max = hist.max(), "Frame binned");
        render_heatmap(&hist, &self.style)
    }
}

/// Number of frames all datasets can show, optionally capped
pub fn shared_frame_count(ensembles: &[&Ensemble], cap: Option<usize>) -> usize {
    let common = ensembles
        .iter()
        .map(|e| e.frame_count())
        .min()
        .unwrap_or(0);
    cap.map_or(common, |c| common.min(c))
}
