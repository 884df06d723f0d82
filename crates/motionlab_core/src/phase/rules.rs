//! Boundary searches on an angle series.
//!
//! Every function takes the series `S[0..N)` and the previous anchor `start`,
//! and returns an index in `start..N` (or a documented fallback). Callers
//! guarantee `N > 0` and `start < N`.

use super::series::{mean, std_dev};

/// First `i` in `max(w, start)..N-w` where the forward window mean exceeds
/// the backward window mean by more than `threshold`.
///
/// Falls back to `max(start, floor(0.1 * N))`.
pub fn velocity_threshold(series: &[f64], start: usize, window: usize, threshold: f64) -> usize {
    let n = series.len();
    let from = window.max(start);
    let to = n.saturating_sub(window);

    (from..to)
        .find(|&i| mean(&series[i..i + window]) - mean(&series[i - window..i]) > threshold)
        .unwrap_or_else(|| start.max(n / 10))
}

/// First maximum of `S[start..]`.
pub fn angle_max(series: &[f64], start: usize) -> usize {
    first_extreme(series, start, |candidate, best| candidate > best)
}

/// First minimum of `S[start..]`.
pub fn angle_min(series: &[f64], start: usize) -> usize {
    first_extreme(series, start, |candidate, best| candidate < best)
}

fn first_extreme(series: &[f64], start: usize, better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = start;
    for (i, &value) in series.iter().enumerate().skip(start + 1) {
        if better(value, series[best]) {
            best = i;
        }
    }
    best
}

/// First `i` in `start+w..N-w` where the population standard deviation of
/// `S[i..i+w]` drops below `variance_threshold`.
///
/// Falls back to `N - 1`.
pub fn stabilization(series: &[f64], start: usize, window: usize, variance_threshold: f64) -> usize {
    let n = series.len();
    let from = start.saturating_add(window);
    let to = n.saturating_sub(window);

    (from..to)
        .find(|&i| std_dev(&series[i..i + window]) < variance_threshold)
        .unwrap_or(n - 1)
}
