//! Seeded illustrative numbers: attention weights, opacities, jitter.
//!
//! None of these are computed from a model. They only need to look plausible
//! and come out the same for the same seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic source of illustrative weights.
pub struct WeightSampler {
    rng: StdRng,
}

impl WeightSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform sample in `[low, high)`. Returns `low` for an empty range.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// An `n x n` matrix of uniform samples with each row scaled to sum to 1.
    pub fn row_normalized(&mut self, n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|_| {
                let row: Vec<f64> = (0..n).map(|_| self.unit()).collect();
                normalize(row)
            })
            .collect()
    }

    /// An `n x n` matrix whose rows are drawn from a flat Dirichlet
    /// distribution (normalised unit exponentials).
    pub fn dirichlet(&mut self, n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|_| {
                // 1 - U lies in (0, 1], so the log is finite.
                let row: Vec<f64> = (0..n).map(|_| -(1.0 - self.unit()).ln()).collect();
                normalize(row)
            })
            .collect()
    }
}

fn normalize(row: Vec<f64>) -> Vec<f64> {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 {
        let n = row.len() as f64;
        return row.iter().map(|_| 1.0 / n).collect();
    }
    row.into_iter().map(|v| v / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_weights() {
        let a = WeightSampler::new(42).row_normalized(6);
        let b = WeightSampler::new(42).row_normalized(6);
        assert_eq!(a, b);
        let c = WeightSampler::new(43).row_normalized(6);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rows_sum_to_one() {
        let mut sampler = WeightSampler::new(7);
        for matrix in [sampler.row_normalized(5), sampler.dirichlet(5)] {
            assert_eq!(matrix.len(), 5);
            for row in matrix {
                let sum: f64 = row.iter().sum();
                assert!((sum - 1.0).abs() < 1e-12);
                assert!(row.iter().all(|w| (0.0..=1.0).contains(w)));
            }
        }
    }

    #[test]
    fn test_uniform_range() {
        let mut sampler = WeightSampler::new(1);
        for _ in 0..100 {
            let v = sampler.uniform(-7.0, 7.0);
            assert!((-7.0..7.0).contains(&v));
        }
        assert_eq!(sampler.uniform(2.0, 2.0), 2.0);
        assert_eq!(sampler.index(0), 0);
    }
}
