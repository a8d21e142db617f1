#![warn(missing_docs)]
//! Microbench Core - Benchmark Model
//!
//! This crate provides the data model and measurement machinery for the
//! harness:
//! - Monotonic clock primitives for nanosecond timing
//! - Typed settings with layered, last-writer-wins resolution
//! - Per-batch measurement state with explicit measurement sections and
//!   counters
//! - The benchmark/suite registration model
//! - The configuration and execution error taxonomy

mod benchmark;
mod clock;
mod error;
mod result;
mod settings;
mod state;
mod suite;

pub use benchmark::{Benchmark, ClosureBenchmark};
pub use clock::{now, BenchmarkClock};
pub use error::{ConfigError, RunError};
pub use result::BenchmarkResult;
pub use settings::{
    default_settings, BenchmarkSettings, OutputFormat, Setting, SettingKey, TimeUnit,
};
pub use state::BenchmarkState;
pub use suite::Suite;
