use std::f64::consts::SQRT_2;

use statrs::function::erf::{erf, erf_inv};

/// Median of the values, or `None` if the slice is empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Median over the present, nonzero, non-NaN values
///
/// Zeros mark undetected genes and are excluded so they do not drag the
/// median down.
pub fn detected_median(values: &[Option<f64>]) -> Option<f64> {
    let detected = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| *v != 0.0 && !v.is_nan())
        .collect::<Vec<_>>();
    median(&detected)
}

/// Number of standard deviations between the original median and the
/// approximated median of the distribution once it is truncated at `y`
///
/// The area left of `y` is halved and the inverse error function maps
/// the remaining distance to the 50% mark back to SD units.
pub fn truncation_shift(y: f64, median: f64, sd: f64) -> f64 {
    let z = (median - y) / sd;
    let retained = erf(z / SQRT_2) / 2.0 + 0.5;
    let target = 0.5 - retained / 2.0;
    if target.is_nan() {
        return f64::NAN;
    }
    erf_inv(target)
}

/// Sum of `flag * weight` plus the intercept
pub fn linear_score(flags: &[f64], weights: &[f64], intercept: f64) -> f64 {
    flags
        .iter()
        .zip(weights.iter())
        .map(|(x, w)| x * w)
        .sum::<f64>()
        + intercept
}
