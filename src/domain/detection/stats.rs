//! Pure statistics over ordered samples.
//!
//! All functions are total over finite input and fall back to `0` when there
//! is not enough data.

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N).
///
/// Returns `0.0` for fewer than two samples and for identical samples,
/// whose mean may be one ulp off the shared value. `precomputed_mean`
/// skips the mean pass when the caller already has it; the result is the
/// same either way.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stddev(values: &[f64], precomputed_mean: Option<f64>) -> f64 {
    if values.len() < 2 || is_constant(values) {
        return 0.0;
    }
    let avg = precomputed_mean.unwrap_or_else(|| mean(values));
    let variance = values
        .iter()
        .map(|v| {
            let delta = v - avg;
            delta * delta
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Absolute Z-score of `value` against `window`.
///
/// Fewer than two samples, or a window with zero variance, scores `0.0`:
/// insufficient data and a constant baseline are both treated as normal.
#[must_use]
pub fn z_score(value: f64, window: &[f64]) -> f64 {
    if window.len() < 2 || is_constant(window) {
        return 0.0;
    }
    let m = mean(window);
    let s = stddev(window, Some(m));
    if s == 0.0 {
        return 0.0;
    }
    ((value - m) / s).abs()
}

#[allow(clippy::float_cmp)]
fn is_constant(values: &[f64]) -> bool {
    values
        .split_first()
        .is_some_and(|(first, rest)| rest.iter().all(|v| v == first))
}

/// Linear mapping of a Z-score onto a 0–100 display confidence.
///
/// Reaches 50 at `z == z_threshold` and saturates at 100 from
/// `z >= 2 * z_threshold`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn confidence_from_z(z: f64, z_threshold: f64) -> u8 {
    let normalised = (z / (z_threshold * 2.0)).clamp(0.0, 1.0);
    (normalised * 100.0).round() as u8
}
