//! Adaptive iteration planner.
//!
//! Decides whether a probe batch produced enough data and, if not, how many
//! iterations the next probe should run. The tuning constants (1.4 target
//! multiplier, 10% significance threshold, 10x expansion cap) are preserved
//! exactly for behavioral compatibility.

use microbench_core::BenchmarkSettings;

/// Whether the most recent probe batch suffices: either the iteration cap
/// was reached or the batch ran for at least the configured minimal time.
pub fn has_collected_enough_data(measurements: &[f64], settings: &BenchmarkSettings) -> bool {
    measurements.len() >= settings.max_iterations()
        || microbench_stats::sum(measurements) / 1e9 >= settings.min_time()
}

/// Iteration count for the next probe, capped at the configured maximum.
///
/// Extrapolates from the last probe towards 1.4x the minimal time. A probe
/// that ran under 10% of the target time is too little signal to trust, so
/// its extrapolation is capped at 10x; a multiplier below 1 is forced to 2
/// to guarantee forward progress. Except at the cap, the returned count
/// strictly exceeds the probe's sample count.
pub fn predict_next_iteration_count(
    measurements: &[f64],
    settings: &BenchmarkSettings,
) -> usize {
    let min_time = settings.min_time();
    let elapsed = (microbench_stats::sum(measurements) / 1e9).max(1e-9);

    let mut multiplier = min_time * 1.4 / elapsed;
    if elapsed / min_time <= 0.1 {
        multiplier = multiplier.min(10.0);
    }
    if multiplier < 1.0 {
        multiplier = 2.0;
    }

    let count = measurements.len();
    let candidate = (multiplier * count as f64).max((count + 1) as f64).round() as usize;
    candidate.min(settings.max_iterations())
}

#[cfg(test)]
mod tests {
    use super::*;
    use microbench_core::{BenchmarkSettings, Setting};

    fn settings(min_time: f64, max_iterations: usize) -> BenchmarkSettings {
        BenchmarkSettings::from_settings(&[
            Setting::MinTime(min_time),
            Setting::MaxIterations(max_iterations),
        ])
    }

    #[test]
    fn test_enough_data_by_time() {
        let settings = settings(1.0, 1_000_000);
        assert!(has_collected_enough_data(&[1e9], &settings));
        assert!(!has_collected_enough_data(&[1e8], &settings));
    }

    #[test]
    fn test_enough_data_by_cap() {
        let settings = settings(1.0, 3);
        assert!(has_collected_enough_data(&[1.0, 2.0, 3.0], &settings));
        assert!(!has_collected_enough_data(&[1.0, 2.0], &settings));
    }

    #[test]
    fn test_one_second_probe_grows_to_two() {
        // One probe that already took the full minimal time still grows:
        // candidate 1.4 rounds below the forced count + 1 floor.
        let settings = settings(1.0, 1_000_000);
        assert_eq!(predict_next_iteration_count(&[1e9], &settings), 2);
    }

    #[test]
    fn test_fast_probe_expansion_is_capped_at_ten_x() {
        // A 1µs probe against a 1s target would extrapolate explosively;
        // the significance cap holds it to 10x.
        let settings = settings(1.0, 1_000_000);
        assert_eq!(predict_next_iteration_count(&[1_000.0], &settings), 10);
    }

    #[test]
    fn test_slow_probe_still_doubles() {
        // Already past the target time: multiplier below 1 is forced to 2.
        let settings = settings(1.0, 1_000_000);
        assert_eq!(predict_next_iteration_count(&[3e9], &settings), 2);
    }

    #[test]
    fn test_prediction_is_capped() {
        let settings = settings(1.0, 5);
        let measurements = vec![10.0; 4];
        assert_eq!(predict_next_iteration_count(&measurements, &settings), 5);
    }

    #[test]
    fn test_growth_is_strict_below_the_cap() {
        let settings = settings(1.0, 1_000_000);
        for size in [1usize, 2, 3, 10, 100, 1000] {
            for sample in [1.0, 1e3, 1e6, 1e9] {
                let measurements = vec![sample; size];
                let next = predict_next_iteration_count(&measurements, &settings);
                assert!(
                    next > size,
                    "prediction {next} did not grow past {size} for sample {sample}"
                );
            }
        }
    }

    #[test]
    fn test_zero_elapsed_probe_makes_progress() {
        let settings = settings(1.0, 1_000_000);
        let next = predict_next_iteration_count(&[0.0], &settings);
        assert!(next > 1);
    }
}
