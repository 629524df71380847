//! Simulation and viewer configuration
//!
//! Defaults mirror the values the analysis workflow was built around:
//! 1000 paths of 1000 steps at dt = 0.001, and a 200x200 histogram over
//! x in [0.6, 1.4], y in [1.6, 2.5] refreshed every 100 ms.

use serde::{Deserialize, Serialize};

use crate::core::{BrusselatorParams, NoiseMatrix, Point};
use crate::error::{Error, Result};

pub const PATH_NUM_DEFAULT: usize = 1000;
pub const CORE_NUM_DEFAULT: usize = 1;
pub const START_X_DEFAULT: f64 = 0.0;
pub const START_Y_DEFAULT: f64 = 0.0;
pub const A_DEFAULT: f64 = 0.0;
pub const B_DEFAULT: f64 = 0.0;
pub const G_DEFAULT: [f64; 4] = [1.0, 0.0, 0.0, 1.0];
pub const STEP_SIZE_DEFAULT: f64 = 0.001;
pub const STEPS_DEFAULT: usize = 1000;

pub const BINS_DEFAULT: usize = 200;
pub const X_RANGE_DEFAULT: [f64; 2] = [0.6, 1.4];
pub const Y_RANGE_DEFAULT: [f64; 2] = [1.6, 2.5];
pub const INTERVAL_MS_DEFAULT: u64 = 100;
/// Added to every histogram cell so empty bins survive log normalisation
pub const OFFSET_DEFAULT: f64 = 0.01;
pub const VMIN_DEFAULT: f64 = 0.01;
pub const VMAX_DEFAULT: f64 = 1000.0;
pub const SIGMA_DEFAULT: f64 = 1.0;
/// Largest bin count per axis the viewer accepts
pub const BINS_MAX: usize = 4096;

/// Everything needed to reproduce an ensemble run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub params: BrusselatorParams,
    pub start: Point,
    pub dt: f64,
    pub steps: usize,
    pub paths: usize,
    pub cores: usize,
    /// Base seed; drawn from the thread RNG when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: BrusselatorParams {
                a: A_DEFAULT,
                b: B_DEFAULT,
                noise: NoiseMatrix(G_DEFAULT),
            },
            start: (START_X_DEFAULT, START_Y_DEFAULT),
            dt: STEP_SIZE_DEFAULT,
            steps: STEPS_DEFAULT,
            paths: PATH_NUM_DEFAULT,
            cores: CORE_NUM_DEFAULT,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let p = &self.params;
        let scalars = [p.a, p.b, self.start.0, self.start.1, self.dt];
        if scalars.iter().chain(p.noise.0.iter()).any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(
                "parameters must be finite numbers".into(),
            ));
        }
        if self.dt <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "step size must be positive, got {}",
                self.dt
            )));
        }
        if self.paths == 0 {
            return Err(Error::InvalidConfig("at least one path is required".into()));
        }
        if self.cores == 0 {
            return Err(Error::InvalidConfig("at least one core is required".into()));
        }
        Ok(())
    }
}

/// Heatmap binning and colouring settings shared by both panels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub bins: usize,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub interval_ms: u64,
    /// Upper bound on animated frames; `None` plays every frame
    pub max_frames: Option<usize>,
    pub offset: f64,
    pub vmin: f64,
    pub vmax: f64,
    /// Gaussian smoothing radius in bins, 0 disables
    pub sigma: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            bins: BINS_DEFAULT,
            x_range: X_RANGE_DEFAULT,
            y_range: Y_RANGE_DEFAULT,
            interval_ms: INTERVAL_MS_DEFAULT,
            max_frames: None,
            offset: OFFSET_DEFAULT,
            vmin: VMIN_DEFAULT,
            vmax: VMAX_DEFAULT,
            sigma: SIGMA_DEFAULT,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 || self.bins > BINS_MAX {
            return Err(Error::InvalidConfig(format!(
                "bin count must be in 1..={BINS_MAX}, got {}",
                self.bins
            )));
        }
        for (name, [lo, hi]) in [("x", self.x_range), ("y", self.y_range)] {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(Error::InvalidConfig(format!(
                    "{name} range [{lo}, {hi}] is empty or inverted"
                )));
            }
        }
        if self.interval_ms == 0 {
            return Err(Error::InvalidConfig("frame interval must be positive".into()));
        }
        if !(self.vmin > 0.0 && self.vmin < self.vmax) || !self.vmax.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "log scale needs 0 < vmin < vmax, got vmin={} vmax={}",
                self.vmin, self.vmax
            )));
        }
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(Error::InvalidConfig("offset must be non-negative".into()));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 || self.sigma > self.bins as f64 {
            return Err(Error::InvalidConfig(format!(
                "sigma must be in [0, {}], got {}",
                self.bins, self.sigma
            )));
        }
        if self.max_frames == Some(0) {
            return Err(Error::InvalidConfig("frame limit must be positive".into()));
        }
        Ok(())
    }

    pub fn range(&self) -> [[f64; 2]; 2] {
        [self.x_range, self.y_range]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        let config = SimulationConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_nan_noise() {
        let mut config = SimulationConfig::default();
        config.params.noise = NoiseMatrix([f64::NAN, 0.0, 0.0, 1.0]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_paths_and_cores() {
        let no_paths = SimulationConfig {
            paths: 0,
            ..Default::default()
        };
        let no_cores = SimulationConfig {
            cores: 0,
            ..Default::default()
        };
        assert!(no_paths.validate().is_err());
        assert!(no_cores.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = ViewerConfig {
            y_range: [2.5, 1.6],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_log_scale() {
        let zero_vmin = ViewerConfig {
            vmin: 0.0,
            ..Default::default()
        };
        let swapped = ViewerConfig {
            vmin: 10.0,
            vmax: 1.0,
            ..Default::default()
        };
        assert!(zero_vmin.validate().is_err());
        assert!(swapped.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_grid_and_kernel() {
        let huge_bins = ViewerConfig {
            bins: 100_000,
            ..Default::default()
        };
        let largest = ViewerConfig {
            bins: BINS_MAX,
            ..Default::default()
        };
        let wide_sigma = ViewerConfig {
            sigma: 1e9,
            ..Default::default()
        };
        assert!(huge_bins.validate().is_err());
        assert!(largest.validate().is_ok());
        assert!(wide_sigma.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_frame_limit() {
        let none = ViewerConfig {
            max_frames: Some(0),
            ..Default::default()
        };
        let one = ViewerConfig {
            max_frames: Some(1),
            ..Default::default()
        };
        assert!(none.validate().is_err());
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_simulation_config_json_round_trip() {
        let config = SimulationConfig {
            seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
