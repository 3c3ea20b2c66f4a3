use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};
use crate::models::{LocationType, ProgressSeries};

/// Number of evaluation points across `[0, 1]`.
pub const DEFAULT_GRID_POINTS: usize = 1000;
/// Kernel bandwidth as a multiple of the sample standard deviation.
pub const DEFAULT_BANDWIDTH_FACTOR: f64 = 0.10;

// ── DensityConfig ─────────────────────────────────────────────────────────────

/// Configuration for the Gaussian kernel density estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityConfig {
    /// Evaluation points, evenly spaced over `[0, 1]` inclusive.
    pub grid_points: usize,
    /// Scales the sample standard deviation to give the kernel width.
    pub bandwidth_factor: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            grid_points: DEFAULT_GRID_POINTS,
            bandwidth_factor: DEFAULT_BANDWIDTH_FACTOR,
        }
    }
}

// ── DensityCurve ──────────────────────────────────────────────────────────────

/// A sampled density function over fractional book locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    /// `(x, density)` pairs with `x` ascending over `[0, 1]`.
    pub points: Vec<(f64, f64)>,
}

impl DensityCurve {
    /// Estimate the annotation density of `samples`.
    ///
    /// Uses a Gaussian kernel whose variance is the sample variance (n − 1
    /// denominator) scaled by `bandwidth_factor²`. Fails for fewer than two
    /// samples or when every sample is identical.
    pub fn estimate(samples: &[f64], config: &DensityConfig) -> Result<Self> {
        if samples.len() < 2 {
            return Err(ProgressError::Density(format!(
                "need at least 2 samples, got {}",
                samples.len()
            )));
        }
        if config.grid_points < 2 {
            return Err(ProgressError::Density(format!(
                "need at least 2 grid points, got {}",
                config.grid_points
            )));
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let kernel_variance = variance * config.bandwidth_factor.powi(2);
        if !kernel_variance.is_finite() || kernel_variance <= 0.0 {
            return Err(ProgressError::Density(
                "samples have zero variance".to_string(),
            ));
        }

        let norm = 1.0 / (n * (2.0 * std::f64::consts::PI * kernel_variance).sqrt());
        let step = 1.0 / (config.grid_points - 1) as f64;

        let points = (0..config.grid_points)
            .map(|i| {
                let x = i as f64 * step;
                let sum: f64 = samples
                    .iter()
                    .map(|s| (-(x - s).powi(2) / (2.0 * kernel_variance)).exp())
                    .sum();
                (x, norm * sum)
            })
            .collect();

        Ok(Self { points })
    }

    /// Location of the highest density, or `None` for an empty curve.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Highest density value, `0.0` for an empty curve.
    pub fn max_density(&self) -> f64 {
        self.peak().map(|(_, y)| y).unwrap_or(0.0)
    }

    /// Trapezoidal area under the sampled curve.
    pub fn area(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum()
    }
}

// ── Per-type densities ────────────────────────────────────────────────────────

/// Estimate one density curve per annotation type present in `series`.
///
/// Types are visited in [`LocationType::ALL`] order and absent types are
/// skipped. Each estimate succeeds or fails on its own.
pub fn type_densities(
    series: &ProgressSeries,
    config: &DensityConfig,
) -> Vec<(LocationType, Result<DensityCurve>)> {
    LocationType::ALL
        .iter()
        .filter_map(|&location_type| {
            let samples = series.fractions_of(location_type);
            if samples.is_empty() {
                None
            } else {
                Some((location_type, DensityCurve::estimate(&samples, config)))
            }
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProgressPoint;
    use chrono::NaiveDate;

    fn series_with(points: &[(f64, LocationType)]) -> ProgressSeries {
        let base = NaiveDate::from_ymd_opt(2022, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        ProgressSeries {
            book_title: "Test".to_string(),
            book_length: 100,
            points: points
                .iter()
                .enumerate()
                .map(|(i, &(fraction, location_type))| ProgressPoint {
                    timestamp: base + chrono::Duration::minutes(i as i64),
                    location: (fraction * 100.0) as u64,
                    fraction,
                    location_type,
                })
                .collect(),
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = DensityConfig::default();
        assert_eq!(cfg.grid_points, 1000);
        assert!((cfg.bandwidth_factor - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_grid_spans_unit_interval() {
        let curve = DensityCurve::estimate(&[0.2, 0.5, 0.8], &DensityConfig::default()).unwrap();
        assert_eq!(curve.points.len(), 1000);
        assert_eq!(curve.points[0].0, 0.0);
        assert!((curve.points[999].0 - 1.0).abs() < 1e-12);
        assert!(curve.points.iter().all(|&(_, y)| y >= 0.0));
    }

    #[test]
    fn test_estimate_integrates_to_one_when_mass_inside_interval() {
        let curve = DensityCurve::estimate(&[0.4, 0.5, 0.6], &DensityConfig::default()).unwrap();
        assert!((curve.area() - 1.0).abs() < 1e-3, "area = {}", curve.area());
    }

    #[test]
    fn test_peak_sits_on_cluster() {
        let samples = [0.1, 0.7, 0.71, 0.72, 0.73];
        let curve = DensityCurve::estimate(&samples, &DensityConfig::default()).unwrap();
        let (x, _) = curve.peak().unwrap();
        assert!((0.65..=0.78).contains(&x), "peak at {}", x);
    }

    #[test]
    fn test_single_sample_is_error() {
        let err = DensityCurve::estimate(&[0.5], &DensityConfig::default()).unwrap_err();
        assert!(matches!(err, ProgressError::Density(_)));
    }

    #[test]
    fn test_identical_samples_is_error() {
        let err = DensityCurve::estimate(&[0.3, 0.3, 0.3], &DensityConfig::default()).unwrap_err();
        assert!(err.to_string().contains("zero variance"));
    }

    #[test]
    fn test_empty_curve_peak_is_none() {
        let curve = DensityCurve { points: vec![] };
        assert!(curve.peak().is_none());
        assert_eq!(curve.max_density(), 0.0);
    }

    #[test]
    fn test_type_densities_fail_independently() {
        let series = series_with(&[
            (0.1, LocationType::Highlight),
            (0.4, LocationType::Highlight),
            (0.9, LocationType::Highlight),
            (0.5, LocationType::Note),
        ]);
        let results = type_densities(&series, &DensityConfig::default());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, LocationType::Highlight);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, LocationType::Note);
        assert!(results[1].1.is_err());
    }

    #[test]
    fn test_type_densities_skips_absent_types() {
        let series = series_with(&[(0.2, LocationType::Bookmark), (0.6, LocationType::Bookmark)]);
        let results = type_densities(&series, &DensityConfig::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, LocationType::Bookmark);
    }
}
