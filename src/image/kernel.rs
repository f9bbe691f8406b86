//! Gaussian smoothing kernel: bin masses of a normal distribution.

use std::f64::consts::SQRT_2;

/// Complementary error function (Abramowitz & Stegun 7.1.26, |ε| < 1.5e-7).
pub(crate) fn erfc(x: f64) -> f64 {
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    poly * (-x * x).exp()
}

/// CDF of N(mean, sigma²) at x
pub(crate) fn normal_cdf(x: f64, mean: f64, sigma: f64) -> f64 {
    0.5 * erfc(-(x - mean) / (sigma * SQRT_2))
}

/// Mass of N(mean, sigma²) inside each bin [lower[k], lower[k] + width].
pub(crate) fn bin_masses(lower: &[f64], width: f64, mean: f64, sigma: f64) -> Vec<f64> {
    lower
        .iter()
        .map(|&lo| (normal_cdf(lo + width, mean, sigma) - normal_cdf(lo, mean, sigma)).max(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdf_reference_values() {
        assert!((normal_cdf(0.0, 0.0, 1.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.0, 0.0, 1.0) - 0.841_344_7).abs() < 1e-6);
        assert!((normal_cdf(-1.96, 0.0, 1.0) - 0.024_997_9).abs() < 1e-6);
        assert!((normal_cdf(12.0, 10.0, 2.0) - 0.841_344_7).abs() < 1e-6);
    }

    #[test]
    fn test_bin_masses_sum_to_covered_mass() {
        let lower: Vec<f64> = (-40..40).map(|k| k as f64 * 0.25).collect();
        let masses = bin_masses(&lower, 0.25, 0.0, 1.0);
        let total: f64 = masses.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!(masses.iter().all(|&m| m >= 0.0));
    }
}
