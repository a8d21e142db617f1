#![warn(missing_docs)]
//! # Microbench
//!
//! A microbenchmark harness: register units of work into suites, let the
//! adaptive planner decide how many repetitions produce a statistically
//! meaningful sample, and query the results through named report columns.
//!
//! - **Layered settings**: defaults, custom defaults, suite, benchmark, and
//!   command-line overrides fold into one effective configuration per
//!   benchmark, last writer wins.
//! - **Adaptive iteration planning**: probes with growing iteration counts
//!   until the measured time is significant, bounded by an iteration cap.
//! - **Explicit measurement sections**: closures may drive their own
//!   `start`/`end`/`measure` boundaries and named counters; "run forever,
//!   stop me when you have enough" bodies terminate cooperatively.
//! - **Column expressions**: report fields like `time.median`,
//!   `counter.bytes.div.time.sum`, or
//!   `percentage.time.std.divide.time.median`, rendered as console tables,
//!   CSV, or JSON.
//!
//! ## Quick start
//!
//! ```no_run
//! use microbench::{Suite, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut suite = Suite::new("add string");
//!
//!     suite.benchmark("no capacity", || {
//!         let mut x = String::new();
//!         for _ in 0..1000 {
//!             x += "hi";
//!         }
//!     });
//!
//!     run(vec![suite])
//! }
//! ```
//!
//! ## Explicit measurement sections
//!
//! ```no_run
//! use microbench::Suite;
//!
//! let mut suite = Suite::new("parsing");
//! suite.benchmark_measured("reuse buffer", |state| {
//!     let mut buffer = Vec::with_capacity(4096);
//!     loop {
//!         buffer.clear();
//!         state.measure(|| buffer.extend(0..1024u32))?;
//!         state.increment_by("elements", 1024.0);
//!     }
//! });
//! ```

pub use microbench_core::{
    default_settings, now, Benchmark, BenchmarkClock, BenchmarkResult, BenchmarkSettings,
    BenchmarkState, ClosureBenchmark, ConfigError, OutputFormat, RunError, Setting,
    SettingKey, Suite, TimeUnit,
};

pub use microbench_report::{
    evaluate, render_report, Aggregate, Alignment, Base, Cell, Column, ColumnRegistry,
    Content, Expr, Formatter, Grid, Unit,
};

pub use microbench_cli::{
    has_collected_enough_data, predict_next_iteration_count, run, run_configured,
    run_each_once, run_with_defaults, Arguments, BenchmarkRunner,
};

/// Convenient imports for benchmark binaries.
pub mod prelude {
    pub use microbench_core::{Setting, Suite, TimeUnit};
    pub use microbench_cli::{run, run_with_defaults};
}

/// Statistics re-exported for custom column definitions.
pub mod stats {
    pub use microbench_stats::{mean, median, percentile, std, sum};
}
