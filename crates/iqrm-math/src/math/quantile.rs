//! Percentiles by linear interpolation between order statistics.
//!
//! The rank of percentile `p` in a sorted sample of length `n` is
//! `p / 100 * (n - 1)`; fractional ranks interpolate between the two
//! neighbouring order statistics.

/// Percentile `p` (in [0, 100]) of an already sorted slice.
///
/// Returns NaN for empty input or a NaN `p`. Out-of-range `p` is clamped.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() || p.is_nan() {
        return f64::NAN;
    }
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile `p` of an unsorted slice.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let sorted = sorted_copy(values);
    percentile_sorted(&sorted, p)
}

/// Several percentiles of the same slice, sorting only once.
pub fn percentiles(values: &[f64], ps: &[f64]) -> Vec<f64> {
    let sorted = sorted_copy(values);
    ps.iter().map(|&p| percentile_sorted(&sorted, p)).collect()
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
