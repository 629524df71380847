//! Platform-agnostic core - simulation, storage and heatmap rendering shared
//! between the CLI and the viewer

pub mod colormap;
pub mod dataset;
pub mod ensemble;
pub mod frames;
pub mod histogram;
pub mod model;
pub mod playback;

pub use colormap::{gaussian_smooth, render_heatmap, Colormap, HeatmapStyle, LogNorm, RgbaImage};
pub use dataset::{
    default_file_name, load_dataset, load_manifest, manifest_path, save_dataset, save_manifest,
    Manifest,
};
pub use ensemble::{resolve_seed, run_ensemble, Bounds, Ensemble};
pub use frames::{shared_frame_count, FrameRenderer};
pub use histogram::Histogram2d;
pub use model::{simulate_path, BrusselatorParams, NoiseMatrix, Path, Point};
pub use playback::Playback;
