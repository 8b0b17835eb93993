//! Cosmetic coordinate jitter for the incident map.
//!
//! Incidents in the same city share coordinates and would be drawn as a
//! single marker. Each coordinate is nudged by Gaussian noise so stacked
//! markers fan out slightly. The noise has no statistical meaning.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Mean of the offset added to each coordinate, in degrees.
pub const JITTER_MEAN: f64 = 0.04;
/// Standard deviation of the offset, in degrees.
pub const JITTER_STD_DEV: f64 = 0.03;

/// How the map handler jitters coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterConfig {
    /// When false, coordinates are plotted exactly as recorded.
    pub enabled: bool,
    /// Fixed seed; every render of the same selection then jitters the same way.
    pub seed: Option<u64>,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: None,
        }
    }
}

impl JitterConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            seed: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            enabled: true,
            seed: Some(seed),
        }
    }
}

/// Per-render noise source. A fresh one is made for every figure so
/// handlers never share random state.
pub(crate) struct Jitter {
    rng: StdRng,
    noise: Option<Normal<f64>>,
}

impl Jitter {
    pub(crate) fn new(config: JitterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let noise = if config.enabled {
            Normal::new(JITTER_MEAN, JITTER_STD_DEV).ok()
        } else {
            None
        };
        Self { rng, noise }
    }

    pub(crate) fn apply(&mut self, coordinate: f64) -> f64 {
        match &self.noise {
            Some(noise) => coordinate + noise.sample(&mut self.rng),
            None => coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_jitter_is_identity() {
        let mut jitter = Jitter::new(JitterConfig::disabled());
        assert_eq!(jitter.apply(44.37), 44.37);
        assert_eq!(jitter.apply(-7.3), -7.3);
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let mut a = Jitter::new(JitterConfig::seeded(7));
        let mut b = Jitter::new(JitterConfig::seeded(7));
        for _ in 0..10 {
            assert_eq!(a.apply(10.0), b.apply(10.0));
        }
    }

    #[test]
    fn jitter_stays_small() {
        let mut jitter = Jitter::new(JitterConfig::seeded(42));
        let offsets: Vec<f64> = (0..2000).map(|_| jitter.apply(0.0)).collect();
        let mean = offsets.iter().sum::<f64>() / offsets.len() as f64;
        assert!((mean - JITTER_MEAN).abs() < 0.01, "mean offset {}", mean);
        // Eight standard deviations out is effectively impossible
        assert!(offsets.iter().all(|o| (o - JITTER_MEAN).abs() < 8.0 * JITTER_STD_DEV));
    }
}
