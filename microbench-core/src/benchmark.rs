//! The benchmark run contract.

use crate::error::RunError;
use crate::settings::Setting;
use crate::state::BenchmarkState;

/// A named unit of work that can be measured.
///
/// `set_up` and `tear_down` default to no-ops and run around every
/// iteration. `run` receives the measurement state; most benchmarks ignore
/// it and let the loop bracket the whole call, while explicit-measurement
/// benchmarks drive their own sections through it.
pub trait Benchmark {
    /// Benchmark name, unique within its suite.
    fn name(&self) -> &str;

    /// Settings layer attached to this benchmark.
    fn settings(&self) -> &[Setting];

    /// Runs before each iteration, outside the measured section.
    fn set_up(&mut self) {}

    /// The measured unit of work.
    fn run(&mut self, state: &mut BenchmarkState) -> Result<(), RunError>;

    /// Runs after each iteration, on all paths.
    fn tear_down(&mut self) {}
}

enum Body {
    /// Implicit measurement: the loop brackets the whole closure call, one
    /// measurement per invocation.
    Plain(Box<dyn FnMut()>),
    /// Explicit measurement: the closure drives its own sections on the
    /// state, zero or more measurements per invocation.
    Measured(Box<dyn FnMut(&mut BenchmarkState) -> Result<(), RunError>>),
}

/// A benchmark defined by a closure, selected at registration time as
/// either implicitly or explicitly measured.
pub struct ClosureBenchmark {
    name: String,
    settings: Vec<Setting>,
    body: Body,
}

impl ClosureBenchmark {
    /// Benchmark whose whole closure call is one measurement.
    pub fn plain(
        name: impl Into<String>,
        settings: Vec<Setting>,
        f: impl FnMut() + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            settings,
            body: Body::Plain(Box::new(f)),
        }
    }

    /// Benchmark whose closure manages its own measurement sections.
    pub fn measured(
        name: impl Into<String>,
        settings: Vec<Setting>,
        f: impl FnMut(&mut BenchmarkState) -> Result<(), RunError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            settings,
            body: Body::Measured(Box::new(f)),
        }
    }
}

impl Benchmark for ClosureBenchmark {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> &[Setting] {
        &self.settings
    }

    fn run(&mut self, state: &mut BenchmarkState) -> Result<(), RunError> {
        match &mut self.body {
            Body::Plain(f) => {
                f();
                Ok(())
            }
            Body::Measured(f) => f(state),
        }
    }
}

impl std::fmt::Debug for ClosureBenchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureBenchmark")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
