//! Benchmark settings and layered resolution.
//!
//! A [`Setting`] is one typed configuration value; [`BenchmarkSettings`] is
//! the effective configuration after folding ordered layers (defaults, then
//! custom defaults, then suite, then benchmark, then caller overrides).
//! Within a layer, later array entries win; across layers, later layers win.
//! Each setting is keyed by its variant, so two values of the same kind never
//! coexist and values of different kinds never collide.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Unit used when reporting time (or inverse-time) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Nanoseconds.
    Nanoseconds,
    /// Microseconds.
    Microseconds,
    /// Milliseconds.
    Milliseconds,
    /// Seconds.
    Seconds,
}

impl TimeUnit {
    /// Nanoseconds per one of this unit.
    pub fn nanos_per_unit(self) -> f64 {
        match self {
            TimeUnit::Nanoseconds => 1.0,
            TimeUnit::Microseconds => 1_000.0,
            TimeUnit::Milliseconds => 1_000_000.0,
            TimeUnit::Seconds => 1_000_000_000.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
        };
        f.write_str(unit)
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ns" => Ok(TimeUnit::Nanoseconds),
            "us" => Ok(TimeUnit::Microseconds),
            "ms" => Ok(TimeUnit::Milliseconds),
            "s" => Ok(TimeUnit::Seconds),
            other => Err(format!("unknown time unit: {other}")),
        }
    }
}

/// Output format for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned human-readable table on stdout.
    Console,
    /// Comma-separated values with a header row.
    Csv,
    /// Machine-readable JSON document.
    Json,
    /// Run benchmarks but emit nothing.
    None,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(OutputFormat::Console),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "none" => Ok(OutputFormat::None),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// One typed, named configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    /// Fixed number of iterations to run. When absent, the iteration count
    /// is detected empirically by the adaptive planner.
    Iterations(usize),
    /// Cap on iterations while empirically detecting the iteration count.
    MaxIterations(usize),
    /// Iterations to run and record separately as warmup before measuring.
    WarmupIterations(usize),
    /// Regex: run only benchmarks whose qualified names match.
    Filter(String),
    /// Regex: exclude benchmarks whose qualified names match.
    FilterNot(String),
    /// Minimal total measured time, in seconds, for a sample to count as
    /// significant.
    MinTime(f64),
    /// Unit for reported time values.
    TimeUnit(TimeUnit),
    /// Unit for reported throughput (inverse-time) values.
    InverseTimeUnit(TimeUnit),
    /// Column names or column expressions to show in the output.
    Columns(Vec<String>),
    /// Output format for the final report.
    Format(OutputFormat),
    /// Suppress intermediate progress updates.
    Quiet(bool),
}

/// Discriminant used to key settings during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SettingKey {
    /// Key for [`Setting::Iterations`].
    Iterations,
    /// Key for [`Setting::MaxIterations`].
    MaxIterations,
    /// Key for [`Setting::WarmupIterations`].
    WarmupIterations,
    /// Key for [`Setting::Filter`].
    Filter,
    /// Key for [`Setting::FilterNot`].
    FilterNot,
    /// Key for [`Setting::MinTime`].
    MinTime,
    /// Key for [`Setting::TimeUnit`].
    TimeUnit,
    /// Key for [`Setting::InverseTimeUnit`].
    InverseTimeUnit,
    /// Key for [`Setting::Columns`].
    Columns,
    /// Key for [`Setting::Format`].
    Format,
    /// Key for [`Setting::Quiet`].
    Quiet,
}

impl Setting {
    /// The key this setting resolves under.
    pub fn key(&self) -> SettingKey {
        match self {
            Setting::Iterations(_) => SettingKey::Iterations,
            Setting::MaxIterations(_) => SettingKey::MaxIterations,
            Setting::WarmupIterations(_) => SettingKey::WarmupIterations,
            Setting::Filter(_) => SettingKey::Filter,
            Setting::FilterNot(_) => SettingKey::FilterNot,
            Setting::MinTime(_) => SettingKey::MinTime,
            Setting::TimeUnit(_) => SettingKey::TimeUnit,
            Setting::InverseTimeUnit(_) => SettingKey::InverseTimeUnit,
            Setting::Columns(_) => SettingKey::Columns,
            Setting::Format(_) => SettingKey::Format,
            Setting::Quiet(_) => SettingKey::Quiet,
        }
    }
}

/// Settings in force unless a later layer overrides them.
pub fn default_settings() -> Vec<Setting> {
    vec![
        Setting::MaxIterations(1_000_000),
        Setting::MinTime(1.0),
        Setting::TimeUnit(TimeUnit::Nanoseconds),
        Setting::InverseTimeUnit(TimeUnit::Seconds),
        Setting::Format(OutputFormat::Console),
        Setting::Quiet(false),
    ]
}

/// Effective configuration after folding ordered setting layers.
///
/// A setting defined multiple times retains only its last set value. The
/// convenience accessors for required settings panic if the default layer
/// was left out — that is a programming error in the harness, not a
/// user-facing condition.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSettings {
    settings: BTreeMap<SettingKey, Setting>,
}

impl BenchmarkSettings {
    /// Fold ordered layers, later layers overriding earlier ones.
    pub fn resolve(layers: &[&[Setting]]) -> Self {
        let mut settings = BTreeMap::new();
        for layer in layers {
            for setting in *layer {
                settings.insert(setting.key(), setting.clone());
            }
        }
        Self { settings }
    }

    /// Fold a single layer on top of the defaults.
    pub fn from_settings(overrides: &[Setting]) -> Self {
        Self::resolve(&[&default_settings(), overrides])
    }

    /// Look up a setting by key.
    pub fn get(&self, key: SettingKey) -> Option<&Setting> {
        self.settings.get(&key)
    }

    /// Fixed iteration count, when explicitly configured.
    pub fn iterations(&self) -> Option<usize> {
        match self.get(SettingKey::Iterations) {
            Some(Setting::Iterations(value)) => Some(*value),
            _ => None,
        }
    }

    /// Iteration cap for the adaptive planner.
    pub fn max_iterations(&self) -> usize {
        match self.get(SettingKey::MaxIterations) {
            Some(Setting::MaxIterations(value)) => *value,
            _ => panic!("MaxIterations must have a default"),
        }
    }

    /// Warmup iterations to run before measuring; zero when unset.
    pub fn warmup_iterations(&self) -> usize {
        match self.get(SettingKey::WarmupIterations) {
            Some(Setting::WarmupIterations(value)) => *value,
            _ => 0,
        }
    }

    /// Inclusion filter pattern, if any.
    pub fn filter(&self) -> Option<&str> {
        match self.get(SettingKey::Filter) {
            Some(Setting::Filter(value)) => Some(value),
            _ => None,
        }
    }

    /// Exclusion filter pattern, if any.
    pub fn filter_not(&self) -> Option<&str> {
        match self.get(SettingKey::FilterNot) {
            Some(Setting::FilterNot(value)) => Some(value),
            _ => None,
        }
    }

    /// Minimal total measured time in seconds.
    pub fn min_time(&self) -> f64 {
        match self.get(SettingKey::MinTime) {
            Some(Setting::MinTime(value)) => *value,
            _ => panic!("MinTime must have a default"),
        }
    }

    /// Unit for reported time values.
    pub fn time_unit(&self) -> TimeUnit {
        match self.get(SettingKey::TimeUnit) {
            Some(Setting::TimeUnit(value)) => *value,
            _ => panic!("TimeUnit must have a default"),
        }
    }

    /// Unit for reported throughput values.
    pub fn inverse_time_unit(&self) -> TimeUnit {
        match self.get(SettingKey::InverseTimeUnit) {
            Some(Setting::InverseTimeUnit(value)) => *value,
            _ => panic!("InverseTimeUnit must have a default"),
        }
    }

    /// Configured output columns, if any.
    pub fn columns(&self) -> Option<&[String]> {
        match self.get(SettingKey::Columns) {
            Some(Setting::Columns(value)) => Some(value),
            _ => None,
        }
    }

    /// Output format for the final report.
    pub fn format(&self) -> OutputFormat {
        match self.get(SettingKey::Format) {
            Some(Setting::Format(value)) => *value,
            _ => panic!("Format must have a default"),
        }
    }

    /// Whether intermediate progress updates are suppressed.
    pub fn quiet(&self) -> bool {
        match self.get(SettingKey::Quiet) {
            Some(Setting::Quiet(value)) => *value,
            _ => panic!("Quiet must have a default"),
        }
    }
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self::resolve(&[&default_settings()])
    }
}
