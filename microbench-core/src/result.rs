//! Completed benchmark results.

use std::collections::HashMap;

use crate::settings::BenchmarkSettings;

/// Immutable record of one completed benchmark.
///
/// Carries the resolved settings so reporting can scale values by the time
/// unit this particular result was configured with — two results in the
/// same report may use different units.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Benchmark name within its suite.
    pub benchmark_name: String,
    /// Owning suite name; empty for the default suite.
    pub suite_name: String,
    /// Effective settings the benchmark ran under.
    pub settings: BenchmarkSettings,
    /// Main measurement batch, nanoseconds per iteration.
    pub measurements: Vec<f64>,
    /// Warmup measurements, kept for reporting but excluded from the main
    /// statistics.
    pub warmup_measurements: Vec<f64>,
    /// Final counter values accumulated by the closure.
    pub counters: HashMap<String, f64>,
}

impl BenchmarkResult {
    /// Qualified `suite.benchmark` name, or the bare benchmark name when
    /// the suite is unnamed.
    pub fn qualified_name(&self) -> String {
        if self.suite_name.is_empty() {
            self.benchmark_name.clone()
        } else {
            format!("{}.{}", self.suite_name, self.benchmark_name)
        }
    }
}
