//! Benchmark suites.

use crate::benchmark::{Benchmark, ClosureBenchmark};
use crate::error::RunError;
use crate::settings::Setting;
use crate::state::BenchmarkState;

/// A named, ordered collection of benchmarks sharing a settings layer.
///
/// Suites are append-only: once registered, benchmarks keep their order and
/// are never removed.
pub struct Suite {
    name: String,
    settings: Vec<Setting>,
    benchmarks: Vec<Box<dyn Benchmark>>,
}

impl Suite {
    /// Empty suite with no settings layer of its own.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_settings(name, vec![])
    }

    /// Empty suite with its own settings layer.
    pub fn with_settings(name: impl Into<String>, settings: Vec<Setting>) -> Self {
        Self {
            name: name.into(),
            settings,
            benchmarks: Vec::new(),
        }
    }

    /// Build a suite by registering benchmarks inside a closure.
    pub fn build(
        name: impl Into<String>,
        settings: Vec<Setting>,
        builder: impl FnOnce(&mut Suite),
    ) -> Self {
        let mut suite = Self::with_settings(name, settings);
        builder(&mut suite);
        suite
    }

    /// Suite name; may be empty for the default suite.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suite's own settings layer.
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Registered benchmarks, in registration order.
    pub fn benchmarks(&self) -> &[Box<dyn Benchmark>] {
        &self.benchmarks
    }

    /// Mutable access for the runner, which needs to drive `FnMut` bodies.
    pub fn benchmarks_mut(&mut self) -> &mut [Box<dyn Benchmark>] {
        &mut self.benchmarks
    }

    /// Register an arbitrary benchmark implementation.
    pub fn register(&mut self, benchmark: Box<dyn Benchmark>) {
        self.benchmarks.push(benchmark);
    }

    /// Register an implicitly measured closure benchmark.
    pub fn benchmark(&mut self, name: impl Into<String>, f: impl FnMut() + 'static) {
        self.register(Box::new(ClosureBenchmark::plain(name, vec![], f)));
    }

    /// Register an implicitly measured closure benchmark with settings.
    pub fn benchmark_with_settings(
        &mut self,
        name: impl Into<String>,
        settings: Vec<Setting>,
        f: impl FnMut() + 'static,
    ) {
        self.register(Box::new(ClosureBenchmark::plain(name, settings, f)));
    }

    /// Register a benchmark whose closure manages its own measurement
    /// sections through the state.
    pub fn benchmark_measured(
        &mut self,
        name: impl Into<String>,
        f: impl FnMut(&mut BenchmarkState) -> Result<(), RunError> + 'static,
    ) {
        self.register(Box::new(ClosureBenchmark::measured(name, vec![], f)));
    }

    /// Register an explicitly measured closure benchmark with settings.
    pub fn benchmark_measured_with_settings(
        &mut self,
        name: impl Into<String>,
        settings: Vec<Setting>,
        f: impl FnMut(&mut BenchmarkState) -> Result<(), RunError> + 'static,
    ) {
        self.register(Box::new(ClosureBenchmark::measured(name, settings, f)));
    }
}

impl std::fmt::Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .field("benchmarks", &self.benchmarks.len())
            .finish()
    }
}
