//! `.brus` dataset files and their JSON manifests
//!
//! A `.brus` file is a pickled `list[list[tuple[float, float]]]`, one inner
//! list per path, so `np.array(pickle.load(f))` yields `(paths, steps + 1, 2)`.
//! The manifest sits next to it as `<file>.json` and records how the run was
//! produced.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path as FsPath, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ensemble::Ensemble;
use crate::config::SimulationConfig;
use crate::error::{Error, Result};

pub const DATASET_EXTENSION: &str = "brus";

/// Provenance record written alongside each dataset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub seed: u64,
    pub config: SimulationConfig,
    pub non_finite_points: usize,
}

impl Manifest {
    pub fn new(config: &SimulationConfig, seed: u64, ensemble: &Ensemble) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            seed,
            config: SimulationConfig {
                seed: Some(seed),
                ..config.clone()
            },
            non_finite_points: ensemble.non_finite_points(),
        }
    }
}

/// File name encoding the run parameters, e.g.
/// `a_1_b_1.9_x_0.9_y_1.8_g_0.01_0_0_0.01_dt_0.001.brus`
pub fn default_file_name(config: &SimulationConfig) -> String {
    let p = &config.params;
    let [g11, g12, g21, g22] = p.noise.0;
    format!(
        "a_{}_b_{}_x_{}_y_{}_g_{}_{}_{}_{}_dt_{}.{}",
        p.a, p.b, config.start.0, config.start.1, g11, g12, g21, g22, config.dt, DATASET_EXTENSION
    )
}

/// Path of the manifest belonging to a dataset file
pub fn manifest_path(dataset: &FsPath) -> PathBuf {
    let mut name = dataset.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

pub fn save_dataset(path: &FsPath, ensemble: &Ensemble) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_pickle::to_writer(&mut writer, ensemble, serde_pickle::SerOptions::new())?;
    writer.flush().map_err(|e| Error::io(path, e))?;

    info!(
        path = %path.display(),
        paths = ensemble.path_count(),
        frames = ensemble.frame_count(),
        "Dataset written"
    );
    Ok(())
}

/// Load and validate a dataset; empty or ragged data is an error
pub fn load_dataset(path: &FsPath) -> Result<Ensemble> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let ensemble: Ensemble =
        serde_pickle::from_reader(BufReader::new(file), serde_pickle::DeOptions::new())?;
    ensemble.validate()?;

    debug!(
        path = %path.display(),
        paths = ensemble.path_count(),
        frames = ensemble.frame_count(),
        "Dataset loaded"
    );
    Ok(ensemble)
}

pub fn save_manifest(path: &FsPath, manifest: &Manifest) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, manifest)?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

pub fn load_manifest(path: &FsPath) -> Result<Manifest> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
