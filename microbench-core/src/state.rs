//! Per-batch measurement state.
//!
//! A [`BenchmarkState`] collects the measurements of one batch of
//! iterations and exposes the settings in force. Apart from the standard
//! benchmark loop, closures can drive customized measurement sections via
//! [`start`](BenchmarkState::start)/[`end`](BenchmarkState::end) or
//! [`measure`](BenchmarkState::measure), and accumulate named counters that
//! are reported alongside timing.
//!
//! The state is created fresh for every batch and exclusively owned by the
//! benchmark currently executing; nothing is shared across benchmarks.

use std::collections::HashMap;

use crate::benchmark::Benchmark;
use crate::clock::BenchmarkClock;
use crate::error::RunError;
use crate::settings::BenchmarkSettings;

/// Mutable state of one batch of benchmark iterations.
#[derive(Debug)]
pub struct BenchmarkState {
    clock: BenchmarkClock,
    measurements: Vec<f64>,
    counters: HashMap<String, f64>,
    iterations: usize,
    settings: BenchmarkSettings,
}

impl BenchmarkState {
    /// Fresh state targeting `iterations` measurements.
    pub fn new(iterations: usize, settings: BenchmarkSettings) -> Self {
        Self {
            clock: BenchmarkClock::new(),
            measurements: Vec::with_capacity(iterations),
            counters: HashMap::new(),
            iterations,
            settings,
        }
    }

    /// Number of measurements this batch is planned to collect.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Settings in force for the current benchmark run.
    pub fn settings(&self) -> &BenchmarkSettings {
        &self.settings
    }

    /// Measurements recorded so far, in nanoseconds.
    pub fn measurements(&self) -> &[f64] {
        &self.measurements
    }

    /// Counters accumulated so far.
    pub fn counters(&self) -> &HashMap<String, f64> {
        &self.counters
    }

    /// Consume the state, yielding its measurements and counters.
    pub fn into_parts(self) -> (Vec<f64>, HashMap<String, f64>) {
        (self.measurements, self.counters)
    }

    /// Explicitly mark the start of a measurement section.
    #[inline]
    pub fn start(&mut self) {
        self.clock.record_start();
    }

    /// Explicitly mark the end of a measurement section and record the time
    /// since its start.
    ///
    /// Only the first `end` after a `start` records anything; a repeated
    /// `end` is a no-op, which is what lets the driving loop bracket
    /// closures that already measured themselves without double-counting.
    #[inline]
    pub fn end(&mut self) -> Result<(), RunError> {
        if !self.clock.end_recorded() {
            self.clock.record_end();
            return self.record();
        }
        Ok(())
    }

    #[inline]
    fn record(&mut self) -> Result<(), RunError> {
        if self.measurements.len() < self.iterations {
            self.measurements.push(self.clock.elapsed() as f64);
            Ok(())
        } else {
            Err(RunError::PlanSatisfied)
        }
    }

    /// Run the closure within a measurement section.
    ///
    /// Closures may call this in an unbounded loop: once the planned
    /// iteration target is reached the plan-satisfied signal propagates out
    /// and the driving loop stops the closure.
    #[inline]
    pub fn measure<F: FnOnce()>(&mut self, f: F) -> Result<(), RunError> {
        self.start();
        f();
        self.end()
    }

    /// Increment a counter by 1, starting from zero if it was never set.
    pub fn increment(&mut self, counter: &str) {
        self.increment_by(counter, 1.0);
    }

    /// Increment a counter by a given value, starting from zero if it was
    /// never set.
    pub fn increment_by(&mut self, counter: &str, value: f64) {
        *self.counters.entry(counter.to_string()).or_insert(0.0) += value;
    }

    /// Set a counter to an exact value.
    pub fn set_counter(&mut self, counter: &str, value: f64) {
        self.counters.insert(counter.to_string(), value);
    }

    /// Drive `benchmark` until this batch's measurement plan is filled.
    ///
    /// Each pass invokes `set_up`, brackets the closure in a measurement
    /// section, and invokes `tear_down` — on every path, including the
    /// plan-satisfied early exit. The plan-satisfied signal is consumed
    /// here; any other closure error aborts the batch and propagates.
    pub fn run_loop(&mut self, benchmark: &mut dyn Benchmark) -> Result<(), RunError> {
        while self.measurements.len() < self.iterations {
            benchmark.set_up();
            self.start();
            let outcome = benchmark.run(self).and_then(|()| self.end());
            benchmark.tear_down();
            match outcome {
                Ok(()) => {}
                Err(RunError::PlanSatisfied) => break,
                Err(fatal) => return Err(fatal),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::ClosureBenchmark;

    fn state(iterations: usize) -> BenchmarkState {
        BenchmarkState::new(iterations, BenchmarkSettings::default())
    }

    #[test]
    fn test_measure_records_once_per_section() {
        let mut state = state(3);
        state.measure(|| {}).unwrap();
        state.measure(|| {}).unwrap();
        assert_eq!(state.measurements().len(), 2);
    }

    #[test]
    fn test_end_without_new_start_is_a_no_op() {
        let mut state = state(3);
        state.start();
        state.end().unwrap();
        state.end().unwrap();
        assert_eq!(state.measurements().len(), 1);
    }

    #[test]
    fn test_measure_signals_once_plan_is_filled() {
        let mut state = state(2);
        state.measure(|| {}).unwrap();
        state.measure(|| {}).unwrap();
        let outcome = state.measure(|| {});
        assert!(matches!(outcome, Err(RunError::PlanSatisfied)));
        assert_eq!(state.measurements().len(), 2);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut state = state(1);
        state.increment("bytes");
        state.increment_by("bytes", 4.0);
        state.set_counter("allocations", 7.0);
        assert_eq!(state.counters()["bytes"], 5.0);
        assert_eq!(state.counters()["allocations"], 7.0);
    }

    #[test]
    fn test_run_loop_fills_plan_for_plain_closures() {
        let mut benchmark = ClosureBenchmark::plain("noop", vec![], || {});
        let mut state = state(10);
        state.run_loop(&mut benchmark).unwrap();
        assert_eq!(state.measurements().len(), 10);
    }

    #[test]
    fn test_run_loop_stops_unbounded_measured_closures() {
        let mut benchmark = ClosureBenchmark::measured("spin", vec![], |state| {
            loop {
                state.measure(|| {})?;
            }
        });
        let mut state = state(25);
        state.run_loop(&mut benchmark).unwrap();
        assert_eq!(state.measurements().len(), 25);
    }

    #[test]
    fn test_run_loop_propagates_closure_failures() {
        let mut benchmark = ClosureBenchmark::measured("broken", vec![], |_state| {
            Err(RunError::from(anyhow::anyhow!("boom")))
        });
        let mut state = state(5);
        let outcome = state.run_loop(&mut benchmark);
        assert!(matches!(outcome, Err(RunError::Failed(_))));
    }
}
