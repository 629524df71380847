//! Additive-noise stochastic Brusselator
//!
//! dx = (1 - (b + 1) x + a x^2 y) dt + g11 dW0 + g12 dW1
//! dy = (b x - a x^2 y) dt           + g21 dW0 + g22 dW1
//!
//! integrated with the Euler–Maruyama scheme.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Concentration pair (x, y)
pub type Point = (f64, f64);

/// One trajectory: the start point followed by one point per step
pub type Path = Vec<Point>;

/// Row-major 2x2 matrix mapping the two Wiener increments onto (x, y)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseMatrix(pub [f64; 4]);

impl NoiseMatrix {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const ZERO: Self = Self([0.0; 4]);

    pub fn apply(&self, w0: f64, w1: f64) -> Point {
        let [g11, g12, g21, g22] = self.0;
        (g11 * w0 + g12 * w1, g21 * w0 + g22 * w1)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&g| g == 0.0)
    }
}

impl Default for NoiseMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrusselatorParams {
    pub a: f64,
    pub b: f64,
    pub noise: NoiseMatrix,
}

impl BrusselatorParams {
    /// Deterministic part of the vector field
    pub fn drift(&self, (x, y): Point) -> Point {
        let x2y = x * x * y;
        (
            1.0 - (self.b + 1.0) * x + self.a * x2y,
            self.b * x - self.a * x2y,
        )
    }

    /// Stationary point of the drift, defined for a != 0
    pub fn fixed_point(&self) -> Option<Point> {
        if self.a == 0.0 {
            return None;
        }
        Some((1.0, self.b / self.a))
    }

    /// Advance one Euler–Maruyama step given two standard normal samples
    pub fn step(&self, p: Point, dt: f64, w0: f64, w1: f64) -> Point {
        let (fx, fy) = self.drift(p);
        let (nx, ny) = self.noise.apply(w0, w1);
        let sq_dt = dt.sqrt();
        (p.0 + fx * dt + nx * sq_dt, p.1 + fy * dt + ny * sq_dt)
    }
}

/// Simulate a single path of `steps` steps starting at `start`
pub fn simulate_path<R: Rng + ?Sized>(
    params: &BrusselatorParams,
    start: Point,
    dt: f64,
    steps: usize,
    rng: &mut R,
) -> Path {
    let mut positions = Vec::with_capacity(steps + 1);
    positions.push(start);

    let mut current = start;
    for _ in 0..steps {
        let w0: f64 = StandardNormal.sample(rng);
        let w1: f64 = StandardNormal.sample(rng);
        current = params.step(current, dt, w0, w1);
        positions.push(current);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet(a: f64, b: f64) -> BrusselatorParams {
        BrusselatorParams {
            a,
            b,
            noise: NoiseMatrix::ZERO,
        }
    }

    #[test]
    fn test_drift_vanishes_at_fixed_point() {
        let params = quiet(1.0, 1.9);
        let fp = params.fixed_point().unwrap();
        assert_eq!(fp, (1.0, 1.9));
        let (fx, fy) = params.drift(fp);
        assert!(fx.abs() < 1e-12);
        assert!(fy.abs() < 1e-12);
    }

    #[test]
    fn test_no_fixed_point_without_autocatalysis() {
        assert!(quiet(0.0, 1.0).fixed_point().is_none());
    }

    #[test]
    fn test_path_length_includes_start() {
        let mut rng = StdRng::seed_from_u64(1);
        let path = simulate_path(&quiet(1.0, 1.9), (0.9, 1.8), 0.001, 25, &mut rng);
        assert_eq!(path.len(), 26);
        assert_eq!(path[0], (0.9, 1.8));
    }

    #[test]
    fn test_zero_noise_matches_euler_recursion() {
        let params = quiet(1.0, 1.9);
        let dt = 0.01;
        let mut rng = StdRng::seed_from_u64(3);
        let path = simulate_path(&params, (0.9, 1.8), dt, 50, &mut rng);

        let mut expected = (0.9, 1.8);
        for p in path.iter().skip(1) {
            let (fx, fy) = params.drift(expected);
            expected = (expected.0 + fx * dt, expected.1 + fy * dt);
            assert!((p.0 - expected.0).abs() < 1e-12);
            assert!((p.1 - expected.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_stable_regime_approaches_fixed_point() {
        // b < 1 + a gives a stable focus
        let params = quiet(1.0, 1.5);
        let mut rng = StdRng::seed_from_u64(0);
        let path = simulate_path(&params, (0.9, 1.8), 0.01, 5000, &mut rng);
        let (x, y) = *path.last().unwrap();
        assert!((x - 1.0).abs() < 1e-3, "x = {x}");
        assert!((y - 1.5).abs() < 1e-3, "y = {y}");
    }

    #[test]
    fn test_noise_matrix_mixes_increments() {
        let g = NoiseMatrix([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(g.apply(1.0, 0.5), (2.0, 5.0));
        assert!(!g.is_zero());
        assert!(NoiseMatrix::ZERO.is_zero());
    }

    #[test]
    fn test_step_scales_noise_by_sqrt_dt() {
        let params = BrusselatorParams {
            a: 0.0,
            b: 0.0,
            noise: NoiseMatrix::IDENTITY,
        };
        // drift at the origin is (1, 0)
        let p = params.step((0.0, 0.0), 0.04, 1.0, -1.0);
        assert!((p.0 - (0.04 + 0.2)).abs() < 1e-12);
        assert!((p.1 + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_path() {
        let params = BrusselatorParams {
            a: 1.0,
            b: 1.9,
            noise: NoiseMatrix([0.01, 0.0, 0.0, 0.01]),
        };
        let a = simulate_path(&params, (0.9, 1.8), 0.001, 100, &mut StdRng::seed_from_u64(9));
        let b = simulate_path(&params, (0.9, 1.8), 0.001, 100, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
