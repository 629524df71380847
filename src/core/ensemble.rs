//! Ensembles of independent Brusselator paths
//!
//! Paths are simulated on a dedicated rayon pool sized by the configured core
//! count. Path `k` draws from its own RNG seeded with `seed + k`, so the
//! output does not depend on how work is split across threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::model::{simulate_path, Path, Point};
use crate::config::SimulationConfig;
use crate::error::{Error, Result};

/// A set of equally long paths; frame `i` is the i-th point of every path
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ensemble {
    pub paths: Vec<Path>,
}

/// Axis-aligned bounding box over finite points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Ensemble {
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of time steps stored per path (including the start point)
    pub fn frame_count(&self) -> usize {
        self.paths.first().map_or(0, |p| p.len())
    }

    /// Positions of every path at time step `index`
    pub fn frame(&self, index: usize) -> impl Iterator<Item = Point> + '_ {
        self.paths.iter().filter_map(move |p| p.get(index).copied())
    }

    /// Reject data the viewer cannot animate: no paths or paths of differing length
    pub fn validate(&self) -> Result<()> {
        let expected = match self.paths.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(Error::EmptyDataset),
        };
        for (path, p) in self.paths.iter().enumerate() {
            if p.len() != expected {
                return Err(Error::RaggedDataset {
                    path,
                    expected,
                    found: p.len(),
                });
            }
        }
        Ok(())
    }

    /// Bounding box of all finite points, `None` if there are none
    pub fn bounds(&self) -> Option<Bounds> {
        let mut acc: Option<Bounds> = None;
        for &(x, y) in self.paths.iter().flatten() {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let b = acc.get_or_insert(Bounds {
                x: [x, x],
                y: [y, y],
            });
            b.x = [b.x[0].min(x), b.x[1].max(x)];
            b.y = [b.y[0].min(y), b.y[1].max(y)];
        }
        acc
    }

    /// Count of points that left the finite domain (numerical blow-up)
    pub fn non_finite_points(&self) -> usize {
        self.paths
            .iter()
            .flatten()
            .filter(|(x, y)| !x.is_finite() || !y.is_finite())
            .count()
    }
}

/// Resolve the base seed: the configured one, or a fresh draw
pub fn resolve_seed(config: &SimulationConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::rng().random())
}

/// Simulate `config.paths` independent paths using `config.cores` threads.
///
/// `on_path_done` is invoked once per finished path, from worker threads.
pub fn run_ensemble<F>(config: &SimulationConfig, seed: u64, on_path_done: F) -> Result<Ensemble>
where
    F: Fn() + Sync,
{
    config.validate()?;

    info!(
        paths = config.paths,
        steps = config.steps,
        cores = config.cores,
        seed,
        "Running ensemble"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.cores)
        .thread_name(|i| format!("brus-worker-{i}"))
        .build()?;

    let paths: Vec<Path> = pool.install(|| {
        (0..config.paths)
            .into_par_iter()
            .map(|k| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
                let path = simulate_path(
                    &config.params,
                    config.start,
                    config.dt,
                    config.steps,
                    &mut rng,
                );
                on_path_done();
                path
            })
            .collect()
    });

    let ensemble = Ensemble::new(paths);
    let diverged = ensemble.non_finite_points();
    if diverged > 0 {
        debug!(diverged, "Ensemble contains non-finite points");
    }
    Ok(ensemble)
}
