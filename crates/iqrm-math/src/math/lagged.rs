//! Lagged differences with clamped boundaries.

/// Returns `d[i] = x[i] - x[i - lag]` for every `i`, same length as `x`.
///
/// Neighbour indices outside the array are clamped: `x[0]` below zero,
/// `x[n - 1]` at or above `n`. A zero lag gives an all-zero difference.
pub fn shifted_diff(x: &[f64], lag: isize) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    x.iter()
        .enumerate()
        .map(|(i, &xi)| xi - x[lagged_neighbour(i, lag, n)])
        .collect()
}

/// Index of the neighbour that `i` is compared against at `lag`.
///
/// Same clamping rule as [`shifted_diff`]; any lag magnitude is accepted,
/// up to `isize::MIN`. `n` must be non-zero.
pub fn lagged_neighbour(i: usize, lag: isize, n: usize) -> usize {
    let last = n.saturating_sub(1);
    let step = lag.unsigned_abs();
    let j = if lag >= 0 {
        i.saturating_sub(step)
    } else {
        i.saturating_add(step)
    };
    j.min(last)
}
