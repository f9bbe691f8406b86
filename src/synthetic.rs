//! Synthetic Rough Surfaces
//!
//! Correlated Gaussian height traces standing in for measured tape
//! profiles:
//!
//!   x(i) = ρ·x(i-1) + ξ(i),   ξ ~ N(0, σ²)
//!   h(i) = μ + x(i)
//!
//! ρ sets the lateral correlation (0 gives white roughness, values close
//! to 1 give long waviness).

use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};

/// Generator for correlated rough profiles
#[derive(Debug, Clone, Copy)]
pub struct RoughSurface {
    mean: f64,
    correlation: f64,
    noise: Normal<f64>,
}

impl RoughSurface {
    /// Fails with `NormalError::BadVariance` unless `sigma` is finite and non-negative.
    pub fn new(mean: f64, sigma: f64, correlation: f64) -> Result<Self, NormalError> {
        if !(sigma >= 0.0) || !sigma.is_finite() {
            return Err(NormalError::BadVariance);
        }
        Ok(Self {
            mean,
            correlation: correlation.clamp(-0.999, 0.999),
            noise: Normal::new(0.0, sigma)?,
        })
    }

    /// Draw a profile of `len` samples
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Vec<f64> {
        let mut x = 0.0;
        (0..len)
            .map(|_| {
                x = self.correlation * x + self.noise.sample(rng);
                self.mean + x
            })
            .collect()
    }
}

/// Rough profile with moderate correlation (ρ = 0.6)
pub fn rough_profile<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    sigma: f64,
    mean: f64,
) -> Result<Vec<f64>, NormalError> {
    Ok(RoughSurface::new(mean, sigma, 0.6)?.sample(rng, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_profiles_repeat() {
        let a = rough_profile(&mut StdRng::seed_from_u64(3), 32, 1.0, 5.0).unwrap();
        let b = rough_profile(&mut StdRng::seed_from_u64(3), 32, 1.0, 5.0).unwrap();
        assert_eq!(a.len(), 32);
        assert_eq!(a, b);
        assert!(a.iter().all(|h| h.is_finite()));
    }

    #[test]
    fn test_mean_level() {
        let surface = RoughSurface::new(10.0, 0.5, 0.0).unwrap();
        let h = surface.sample(&mut StdRng::seed_from_u64(1), 4000);
        let mean = h.iter().sum::<f64>() / h.len() as f64;
        assert!((mean - 10.0).abs() < 0.1);
    }

    #[test]
    fn test_invalid_sigma() {
        assert_eq!(RoughSurface::new(0.0, -1.0, 0.5).err(), Some(NormalError::BadVariance));
        assert!(RoughSurface::new(0.0, f64::NAN, 0.5).is_err());
        assert!(RoughSurface::new(0.0, f64::INFINITY, 0.5).is_err());
        assert!(RoughSurface::new(0.0, 0.0, 0.5).is_ok());
    }
}
