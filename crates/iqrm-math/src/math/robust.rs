//! One-sided outlier test based on Tukey's interquartile range.
//!
//! The inlier population is assumed Gaussian, so the IQR is rescaled to a
//! standard deviation and the threshold is expressed in sigmas. Only large
//! positive deviations from the median are flagged: contamination is
//! expected to increase the statistic.

use serde::Serialize;

use crate::math::quantile::percentiles;

/// Ratio between the interquartile range and the standard deviation of a
/// normal distribution (2 * 0.6745).
pub const IQR_TO_SIGMA: f64 = 1.349;

/// Order statistics behind a robust outlier decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// IQR rescaled to a Gaussian standard deviation.
    pub scale: f64,
}

impl IqrSummary {
    /// Value above which a sample is an outlier at `threshold` sigmas.
    ///
    /// None when the scale is degenerate, in which case nothing is flagged.
    pub fn cutoff(&self, threshold: f64) -> Option<f64> {
        if self.scale > 0.0 && self.scale.is_finite() {
            Some(self.median + threshold * self.scale)
        } else {
            None
        }
    }
}

/// Quartiles and robust scale of `values`.
///
/// Returns None for empty input.
pub fn iqr_summary(values: &[f64]) -> Option<IqrSummary> {
    if values.is_empty() {
        return None;
    }
    let q = percentiles(values, &[25.0, 50.0, 75.0]);
    let (q1, median, q3) = (q[0], q[1], q[2]);
    Some(IqrSummary {
        q1,
        median,
        q3,
        scale: (q3 - q1) / IQR_TO_SIGMA,
    })
}

/// Outlier mask for `values`: `true` where `x > median + threshold * scale`.
///
/// A zero scale (constant or near-constant input) flags nothing.
pub fn outlier_mask(values: &[f64], threshold: f64) -> Vec<bool> {
    let mut mask = vec![false; values.len()];
    let Some(cutoff) = iqr_summary(values).and_then(|s| s.cutoff(threshold)) else {
        return mask;
    };
    for (flag, &v) in mask.iter_mut().zip(values) {
        *flag = v > cutoff;
    }
    mask
}
