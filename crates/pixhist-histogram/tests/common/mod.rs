//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use approx::assert_relative_eq;

/// Clifford attractor parameters giving a well-spread orbit
pub const CLIFFORD: (f64, f64, f64, f64) = (-2.3, 1.9, 2.3, 1.2);

/// Orbit of the Clifford attractor starting after `(x0, y0)`
#[derive(Debug, Clone, Copy)]
pub struct CliffordOrbit {
    x: f64,
    y: f64,
}

impl Iterator for CliffordOrbit {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let (a, b, c, d) = CLIFFORD;
        let x = (a * self.y).sin() + c * (a * self.x).cos();
        let y = (b * self.x).sin() + d * (b * self.y).cos();
        self.x = x;
        self.y = y;
        Some((x, y))
    }
}

pub fn clifford_orbit(x0: f64, y0: f64) -> CliffordOrbit {
    CliffordOrbit { x: x0, y: y0 }
}

/// `n` points drawn uniformly from `[lo, hi)` on both axes
pub fn uniform_points(seed: u64, n: usize, lo: f64, hi: f64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| (rng.gen_range(lo..hi), rng.gen_range(lo..hi))).unzip()
}

/// Endless uniform stream in `[lo, hi)`, reproducible from `seed`
pub fn uniform_stream(seed: u64, lo: f64, hi: f64) -> impl Iterator<Item = (f64, f64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    std::iter::from_fn(move || Some((rng.gen_range(lo..hi), rng.gen_range(lo..hi))))
}

/// Install a test subscriber honoring `RUST_LOG`; repeated calls are ignored
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
