//! Summary statistics for a signal buffer.

use serde::{Deserialize, Serialize};

/// Decimal places used when none is configured.
pub const DEFAULT_PRECISION: u32 = 2;

/// Upper bound on decimal places. `f64` carries about 15 significant digits.
pub const MAX_PRECISION: u32 = 15;

/// Mean, population standard deviation, extremes and sample count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Statistics of one signal: all fields, or none of them.
///
/// A NaN sample makes every field NaN; `count` still counts it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statistics {
    NotApplicable,
    Summary(Summary),
}

impl Statistics {
    pub fn of(samples: &[f64]) -> Self {
        Self::with_precision(samples, DEFAULT_PRECISION)
    }

    /// `None` stands for a signal that was never loaded.
    pub fn of_optional(samples: Option<&[f64]>) -> Self {
        samples.map_or(Statistics::NotApplicable, Self::of)
    }

    /// `decimals` is capped at [`MAX_PRECISION`]. Halves round to even.
    pub fn with_precision(samples: &[f64], decimals: u32) -> Self {
        if samples.is_empty() {
            return Statistics::NotApplicable;
        }
        if samples.iter().any(|v| v.is_nan()) {
            return Statistics::Summary(Summary {
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                count: samples.len(),
            });
        }
        let decimals = decimals.min(MAX_PRECISION);
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Statistics::Summary(Summary {
            mean: round_to(mean, decimals),
            std: round_to(var.sqrt(), decimals),
            min: round_to(min, decimals),
            max: round_to(max, decimals),
            count: samples.len(),
        })
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Statistics::NotApplicable => None,
            Statistics::Summary(s) => Some(s),
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Statistics::Summary(_))
    }

    /// `label: value` lines for display. Empty when not applicable.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Statistics::NotApplicable => Vec::new(),
            Statistics::Summary(s) => vec![
                format!("mean: {}", s.mean),
                format!("std: {}", s.std),
                format!("min: {}", s.min),
                format!("max: {}", s.max),
                format!("samples: {}", s.count),
            ],
        }
    }
}

fn round_to(v: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_PRECISION) as i32);
    let r = (v * scale).round_ties_even() / scale;
    // Avoid printing "-0".
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_requested_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.001, 2), 0.0);
        assert!(round_to(-0.001, 2).is_sign_positive());
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-0.125, 2), -0.12);
    }

    #[test]
    fn oversized_precision_is_capped() {
        assert_eq!(round_to(0.1, u32::MAX), 0.1);
        assert!(round_to(1.0 / 3.0, 400).is_finite());
    }
}
