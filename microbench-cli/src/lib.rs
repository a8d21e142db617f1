#![warn(missing_docs)]
//! Microbench CLI - Runner and Flags
//!
//! Drives benchmark execution:
//! - Command-line flags parsed into a caller-overrides settings layer
//! - The adaptive iteration planner
//! - The sequential benchmark runner with filtering, warmup, and progress
//!   reporting

mod args;
mod planner;
mod runner;

pub use args::Arguments;
pub use planner::{has_collected_enough_data, predict_next_iteration_count};
pub use runner::BenchmarkRunner;

use anyhow::Context;
use clap::Parser;

use microbench_core::{
    default_settings, BenchmarkSettings, BenchmarkState, Setting, Suite,
};
use microbench_report::{render_report, ColumnRegistry};

/// Parse command-line flags, run all suites, and report on stdout.
pub fn run(suites: Vec<Suite>) -> anyhow::Result<()> {
    run_with_defaults(suites, vec![])
}

/// Like [`run`], with an extra defaults layer applied below the suite and
/// benchmark settings (and below the command-line flags).
pub fn run_with_defaults(
    suites: Vec<Suite>,
    custom_defaults: Vec<Setting>,
) -> anyhow::Result<()> {
    let arguments = Arguments::parse();
    run_configured(
        suites,
        custom_defaults,
        arguments.settings(),
        &ColumnRegistry::default(),
    )?;
    Ok(())
}

/// Fully programmatic entry point: no flag parsing, explicit column
/// registry. Renders to stdout in the configured format and also returns
/// the results.
pub fn run_configured(
    mut suites: Vec<Suite>,
    custom_defaults: Vec<Setting>,
    overrides: Vec<Setting>,
    registry: &ColumnRegistry,
) -> anyhow::Result<Vec<microbench_core::BenchmarkResult>> {
    let runner =
        BenchmarkRunner::with_defaults(&mut suites, custom_defaults.clone(), overrides.clone(), registry);
    let results = runner.run()?;

    let output_settings =
        BenchmarkSettings::resolve(&[&default_settings(), &custom_defaults, &overrides]);
    let stdout = std::io::stdout();
    render_report(&results, registry, &output_settings, &mut stdout.lock())?;
    Ok(results)
}

/// Run every registered benchmark for a single iteration, so benchmark
/// binaries double as smoke tests.
pub fn run_each_once(suites: &mut [Suite]) -> anyhow::Result<()> {
    for suite in suites.iter_mut() {
        let suite_name = suite.name().to_string();
        for benchmark in suite.benchmarks_mut() {
            let qualified = if suite_name.is_empty() {
                benchmark.name().to_string()
            } else {
                format!("{suite_name}.{}", benchmark.name())
            };
            let mut state = BenchmarkState::new(1, BenchmarkSettings::default());
            state
                .run_loop(benchmark.as_mut())
                .with_context(|| format!("benchmark `{qualified}` failed"))?;
        }
    }
    Ok(())
}
