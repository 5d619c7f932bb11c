//! Geometric lag schedule.
//!
//! Probing every lag in `[-radius, radius]` costs O(radius) passes over the
//! data. Growing the magnitude geometrically needs only O(log radius) passes
//! at the price of skipping some intermediate lags; for large radii the
//! exact boundary is not covered.

pub use iqrm_config::DEFAULT_GEOMETRIC_FACTOR;

/// Positive lag magnitudes up to `radius`, in increasing order.
///
/// Starts at 1; the next magnitude is `max(floor(factor * lag), lag + 1)`.
pub fn lag_magnitudes(radius: usize, geometric_factor: f64) -> Vec<usize> {
    let mut out = Vec::new();
    let mut lag = 1usize;
    while lag <= radius {
        out.push(lag);
        let grown = (geometric_factor * lag as f64).floor();
        // A non-finite or huge product saturates; the +1 fallback keeps progress.
        let grown = if grown.is_finite() && grown < usize::MAX as f64 {
            grown as usize
        } else {
            usize::MAX
        };
        lag = match grown.max(lag.saturating_add(1)) {
            next if next > lag => next,
            _ => break,
        };
    }
    out
}

/// Signed lags to probe: `+m, -m` for every magnitude `m`.
pub fn generate_lags(radius: usize, geometric_factor: f64) -> Vec<isize> {
    lag_magnitudes(radius, geometric_factor)
        .into_iter()
        .filter_map(|m| isize::try_from(m).ok())
        .flat_map(|m| [m, -m])
        .collect()
}
