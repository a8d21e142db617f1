#![warn(missing_docs)]
//! Statistics over benchmark timing samples.
//!
//! Pure functions over an ordered sequence of non-negative reals
//! (nanoseconds). No allocation beyond a sort buffer, no side effects.
//! Percentiles use linear interpolation between nearest ranks, so a
//! percentile of 50 agrees with [`median`] for odd-length inputs.

/// Sum of all samples.
pub fn sum(samples: &[f64]) -> f64 {
    samples.iter().sum()
}

/// Arithmetic mean, or `0` for an empty sequence.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    sum(samples) / samples.len() as f64
}

/// Median of the samples.
///
/// Falls back to [`mean`] for fewer than two elements, so an empty
/// sequence yields `0` and a singleton yields its only element. Even-length
/// sequences average the two central elements of the sorted order.
pub fn median(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return mean(samples);
    }

    let sorted = sorted(samples);
    let center = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return sorted[center];
    }
    (sorted[center - 1] + sorted[center]) / 2.0
}

/// Sample standard deviation with `n/(n-1)` correction.
///
/// Defined as `0` for zero or one samples rather than being undefined, so
/// callers never see a NaN or a negative root out of this function.
pub fn std(samples: &[f64]) -> f64 {
    let n = samples.len() as f64;
    if n < 2.0 {
        return 0.0;
    }

    let mean_value = mean(samples);
    let sum_squared: f64 = samples.iter().map(|x| x * x).sum();
    let avg_squares = sum_squared / n;
    // Population variance rescaled by n/(n-1); clamp tiny negative
    // round-off before the root.
    let variance = n / (n - 1.0) * (avg_squares - mean_value * mean_value);
    variance.max(0.0).sqrt()
}

/// Percentile `p` of the samples for `p` in `[0, 100]`.
///
/// Linear interpolation between the two nearest ranks of the sorted
/// sequence: `index = (n - 1) * p / 100`, interpolating between
/// `floor(index)` and `ceil(index)`. Empty input yields `0`.
///
/// # Panics
///
/// Panics if `p` lies outside `[0, 100]`; user-supplied percentiles are
/// validated at configuration time before this is ever reached.
pub fn percentile(p: f64, samples: &[f64]) -> f64 {
    assert!(
        (0.0..=100.0).contains(&p),
        "percentile must lie within [0, 100], got {p}"
    );
    if samples.is_empty() {
        return 0.0;
    }

    let sorted = sorted(samples);
    let rank = (sorted.len() - 1) as f64 * p / 100.0;
    let low = rank.floor();
    let high = rank.ceil();
    if low == high {
        return sorted[low as usize];
    }
    sorted[low as usize] * (high - rank) + sorted[high as usize] * (rank - low)
}

fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}
