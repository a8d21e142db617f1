//! The benchmark runner.
//!
//! Resolves effective settings per benchmark, applies the name filters,
//! drives warmup plus either a fixed iteration count or the adaptive
//! planner, and produces one [`BenchmarkResult`] per executed benchmark.
//!
//! Execution is strictly sequential: one benchmark runs to completion,
//! warmup and probing included, before the next begins. All configuration
//! is validated up front, so configuration errors surface before any
//! benchmark executes; a failing closure aborts the whole run.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use regex::{Regex, RegexBuilder};

use microbench_core::{
    default_settings, Benchmark, BenchmarkResult, BenchmarkSettings, BenchmarkState,
    ConfigError, Setting, Suite,
};
use microbench_report::ColumnRegistry;

use crate::planner;

/// Runs suites of benchmarks under layered settings.
pub struct BenchmarkRunner<'a> {
    suites: &'a mut [Suite],
    custom_defaults: Vec<Setting>,
    overrides: Vec<Setting>,
    registry: &'a ColumnRegistry,
}

/// One benchmark selected for execution, with its settings resolved.
struct PlannedRun {
    suite_index: usize,
    benchmark_index: usize,
    suite_name: String,
    benchmark_name: String,
    qualified_name: String,
    settings: BenchmarkSettings,
}

impl<'a> BenchmarkRunner<'a> {
    /// Runner with caller overrides as the outermost settings layer.
    pub fn new(
        suites: &'a mut [Suite],
        overrides: Vec<Setting>,
        registry: &'a ColumnRegistry,
    ) -> Self {
        Self::with_defaults(suites, vec![], overrides, registry)
    }

    /// Runner with an additional custom-defaults layer between the global
    /// defaults and the suite settings.
    pub fn with_defaults(
        suites: &'a mut [Suite],
        custom_defaults: Vec<Setting>,
        overrides: Vec<Setting>,
        registry: &'a ColumnRegistry,
    ) -> Self {
        Self {
            suites,
            custom_defaults,
            overrides,
            registry,
        }
    }

    /// Validate configuration, execute every selected benchmark, and return
    /// their results in suite registration order.
    pub fn run(mut self) -> anyhow::Result<Vec<BenchmarkResult>> {
        let plan = self.plan()?;

        let quiet = BenchmarkSettings::resolve(&[
            &default_settings(),
            &self.custom_defaults,
            &self.overrides,
        ])
        .quiet();
        let progress = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(plan.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            bar
        };

        let mut results = Vec::with_capacity(plan.len());
        for planned in &plan {
            progress.set_message(planned.qualified_name.clone());
            results.push(self.run_one(planned)?);
            progress.inc(1);
        }
        progress.finish_and_clear();
        Ok(results)
    }

    /// Resolve settings and apply filters for every registered benchmark,
    /// surfacing every configuration error before anything executes.
    fn plan(&self) -> anyhow::Result<Vec<PlannedRun>> {
        let mut plan = Vec::new();
        for (suite_index, suite) in self.suites.iter().enumerate() {
            for (benchmark_index, benchmark) in suite.benchmarks().iter().enumerate() {
                let settings = BenchmarkSettings::resolve(&[
                    &default_settings(),
                    &self.custom_defaults,
                    suite.settings(),
                    benchmark.settings(),
                    &self.overrides,
                ]);
                self.validate(&settings)?;

                let qualified_name = qualified_name(suite.name(), benchmark.name());
                if !included(&settings, &qualified_name)? {
                    continue;
                }
                plan.push(PlannedRun {
                    suite_index,
                    benchmark_index,
                    suite_name: suite.name().to_string(),
                    benchmark_name: benchmark.name().to_string(),
                    qualified_name,
                    settings,
                });
            }
        }
        Ok(plan)
    }

    fn validate(&self, settings: &BenchmarkSettings) -> Result<(), ConfigError> {
        if settings.iterations() == Some(0) {
            return Err(ConfigError::NonPositive {
                flag: "--iterations",
                kind: "integer",
            });
        }
        if settings.max_iterations() == 0 {
            return Err(ConfigError::NonPositive {
                flag: "--max-iterations",
                kind: "integer",
            });
        }
        if settings.min_time() <= 0.0 {
            return Err(ConfigError::NonPositive {
                flag: "--min-time",
                kind: "floating point number",
            });
        }
        if let Some(specs) = settings.columns() {
            for spec in specs {
                self.registry.parse(spec)?;
            }
        }
        Ok(())
    }

    fn run_one(&mut self, planned: &PlannedRun) -> anyhow::Result<BenchmarkResult> {
        let benchmark =
            self.suites[planned.suite_index].benchmarks_mut()[planned.benchmark_index].as_mut();
        let settings = &planned.settings;

        let mut warmup_measurements = Vec::new();
        let warmup = settings.warmup_iterations();
        if warmup > 0 {
            let mut state = BenchmarkState::new(warmup, settings.clone());
            state
                .run_loop(benchmark)
                .with_context(|| format!("benchmark `{}` failed", planned.qualified_name))?;
            let (measurements, _) = state.into_parts();
            warmup_measurements = measurements;
        }

        let state = match settings.iterations() {
            Some(iterations) => {
                let mut state = BenchmarkState::new(iterations, settings.clone());
                state
                    .run_loop(benchmark)
                    .with_context(|| format!("benchmark `{}` failed", planned.qualified_name))?;
                state
            }
            None => run_adaptive(benchmark, settings)
                .with_context(|| format!("benchmark `{}` failed", planned.qualified_name))?,
        };

        let (measurements, counters) = state.into_parts();
        Ok(BenchmarkResult {
            benchmark_name: planned.benchmark_name.clone(),
            suite_name: planned.suite_name.clone(),
            settings: settings.clone(),
            measurements,
            warmup_measurements,
            counters,
        })
    }
}

/// Probe with growing iteration counts until enough data is collected.
///
/// The stop check is skipped on the very first probe — a single sample is
/// too noisy to accept — unless one iteration is also the cap.
fn run_adaptive(
    benchmark: &mut dyn Benchmark,
    settings: &BenchmarkSettings,
) -> Result<BenchmarkState, microbench_core::RunError> {
    let max_iterations = settings.max_iterations();
    let mut iterations = 1;
    let mut first_probe = true;
    loop {
        let mut state = BenchmarkState::new(iterations, settings.clone());
        state.run_loop(benchmark)?;

        let skip_check = first_probe && max_iterations > 1;
        first_probe = false;
        if !skip_check && planner::has_collected_enough_data(state.measurements(), settings) {
            return Ok(state);
        }

        let next = planner::predict_next_iteration_count(state.measurements(), settings);
        let collected = state.measurements().len();
        if next <= collected && next < max_iterations {
            // Without strict growth the probe loop would never terminate.
            panic!(
                "iteration planner failed to make progress: {collected} -> {next} \
                 (cap {max_iterations})"
            );
        }
        iterations = next;
    }
}

/// Qualified `suite.benchmark` name used by the filters and reports.
fn qualified_name(suite: &str, benchmark: &str) -> String {
    if suite.is_empty() {
        benchmark.to_string()
    } else {
        format!("{suite}.{benchmark}")
    }
}

/// Whether the qualified name passes the include filter and misses the
/// exclude filter. Filtering is a pure gate; skipped benchmarks never
/// measure.
fn included(settings: &BenchmarkSettings, qualified_name: &str) -> Result<bool, ConfigError> {
    if let Some(pattern) = settings.filter() {
        if !compile(pattern)?.is_match(qualified_name) {
            return Ok(false);
        }
    }
    if let Some(pattern) = settings.filter_not() {
        if compile(pattern)?.is_match(qualified_name) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })
}
