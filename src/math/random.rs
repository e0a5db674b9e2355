//! Random vector sampling shared by both layout engines.
//!
//! A [`RandomField`] owns its generator stream. Whoever builds a solver
//! decides the seed once; nothing here touches process-wide state.
//!
//! Gaussian draws use the polar Box-Muller method, which produces two
//! independent normal samples per accepted point of the unit disk. The
//! second sample is parked and handed out by the next draw.

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Vector3;

/// Seedable source of uniform, spherical and Gaussian samples.
#[derive(Debug, Clone)]
pub struct RandomField {
    rng: ChaCha8Rng,
    /// Leftover standard-normal sample from the last polar draw.
    spare: Option<f64>,
}

impl RandomField {
    /// Deterministic field for reproducible layouts and tests.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            spare: None,
        }
    }

    /// Field seeded from the operating system (or `crypto.getRandomValues` on wasm).
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            spare: None,
        }
    }

    /// Seeded when `seed` is given, from entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed_u64(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform sample in `[lo, hi)`. Degenerate ranges return `lo`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.rng.r#gen::<f64>()
    }

    /// True with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.rng.r#gen::<f64>() < p
        }
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0`.
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot draw an index from an empty range");
        self.rng.gen_range(0..len)
    }

    /// `k` distinct indices from `0..len`, in random order.
    pub fn sample_indices(&mut self, len: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, k.min(len)).into_vec()
    }

    /// Shuffle `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Random direction, uniformly distributed on the unit sphere.
    pub fn unit_vector(&mut self) -> Vector3 {
        let z = self.uniform(-1.0, 1.0);
        let phi = self.uniform(0.0, 2.0 * PI);
        let ring = (1.0 - z * z).max(0.0).sqrt();
        Vector3::new(ring * phi.cos(), ring * phi.sin(), z)
    }

    /// Point uniformly distributed over the volume of a ball of `max_radius`.
    ///
    /// The radius is drawn as `max_radius * cbrt(u)` so the expected
    /// magnitude is `3 * max_radius / 4`.
    pub fn uniform_in_sphere(&mut self, max_radius: f64) -> Vector3 {
        if max_radius <= 0.0 {
            return Vector3::ZERO;
        }
        let r = max_radius * self.rng.r#gen::<f64>().cbrt();
        let theta = (1.0 - 2.0 * self.rng.r#gen::<f64>()).clamp(-1.0, 1.0).acos();
        let phi = self.uniform(0.0, 2.0 * PI);
        let (sin_theta, cos_theta) = theta.sin_cos();
        Vector3::new(
            r * sin_theta * phi.cos(),
            r * sin_theta * phi.sin(),
            r * cos_theta,
        )
    }

    /// One N(0, sigma²) sample.
    pub fn gaussian(&mut self, sigma: f64) -> f64 {
        self.standard_normal() * sigma
    }

    /// `v` plus an independent N(0, sigma²) offset on each axis.
    pub fn gaussian_perturb(&mut self, v: Vector3, sigma: f64) -> Vector3 {
        Vector3::new(
            v.x + self.gaussian(sigma),
            v.y + self.gaussian(sigma),
            v.z + self.gaussian(sigma),
        )
    }

    fn standard_normal(&mut self) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }
        loop {
            let u = 2.0 * self.rng.r#gen::<f64>() - 1.0;
            let v = 2.0 * self.rng.r#gen::<f64>() - 1.0;
            let s = u * u + v * v;
            if s > 1.0 || s == 0.0 {
                continue;
            }
            let scale = (-2.0 * s.ln() / s).sqrt();
            self.spare = Some(v * scale);
            return u * scale;
        }
    }
}

impl Default for RandomField {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_sphere_zero_radius() {
        let mut field = RandomField::from_seed_u64(1);
        for _ in 0..100 {
            assert_eq!(field.uniform_in_sphere(0.0), Vector3::ZERO);
        }
    }

    #[test]
    fn test_uniform_in_sphere_volume_distribution() {
        let mut field = RandomField::from_seed_u64(7);
        let radius = 4.0;
        let samples = 10_000;

        let mut total = 0.0;
        for _ in 0..samples {
            let length = field.uniform_in_sphere(radius).length();
            assert!(length <= radius + 1e-9, "sample outside sphere: {length}");
            total += length;
        }

        let mean = total / samples as f64;
        let expected = 0.75 * radius;
        assert!(
            (mean - expected).abs() < 0.05 * radius,
            "mean magnitude {mean}, expected about {expected}"
        );
    }

    #[test]
    fn test_gaussian_moments() {
        let mut field = RandomField::from_seed_u64(42);
        let sigma = 2.0;
        let samples = 20_000;

        let draws: Vec<f64> = (0..samples).map(|_| field.gaussian(sigma)).collect();
        let mean = draws.iter().sum::<f64>() / samples as f64;
        let variance = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / samples as f64;

        assert!(mean.abs() < 0.1, "mean {mean}");
        assert!((variance - sigma * sigma).abs() < 0.3, "variance {variance}");
    }

    #[test]
    fn test_gaussian_perturb_zero_sigma_is_identity() {
        let mut field = RandomField::from_seed_u64(3);
        let v = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(field.gaussian_perturb(v, 0.0), v);
    }

    #[test]
    fn test_spare_sample_is_consumed() {
        let mut field = RandomField::from_seed_u64(11);
        field.gaussian(1.0);
        assert!(field.spare.is_some());
        field.gaussian(1.0);
        assert!(field.spare.is_none());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomField::from_seed_u64(99);
        let mut b = RandomField::from_seed_u64(99);
        for _ in 0..10 {
            assert_eq!(a.gaussian_perturb(Vector3::ZERO, 1.0), b.gaussian_perturb(Vector3::ZERO, 1.0));
            assert_eq!(a.uniform_in_sphere(5.0), b.uniform_in_sphere(5.0));
        }
    }

    #[test]
    fn test_unit_vector_has_unit_length() {
        let mut field = RandomField::from_seed_u64(5);
        for _ in 0..1000 {
            assert!((field.unit_vector().length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_indices_distinct() {
        let mut field = RandomField::from_seed_u64(8);
        let mut picked = field.sample_indices(10, 4);
        assert_eq!(picked.len(), 4);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|&i| i < 10));

        // Asking for more than exists returns everything once
        assert_eq!(field.sample_indices(3, 10).len(), 3);
    }

    #[test]
    fn test_chance_edges() {
        let mut field = RandomField::from_seed_u64(2);
        assert!(!field.chance(0.0));
        assert!(field.chance(1.0));
        assert_eq!(field.uniform(2.0, 2.0), 2.0);
    }
}
