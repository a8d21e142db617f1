//! Command-line flags, converted into a caller-overrides settings layer.

use clap::Parser;

use microbench_core::{OutputFormat, Setting, TimeUnit};

/// Dynamic configuration of the benchmark execution.
#[derive(Parser, Debug, Default)]
#[command(name = "microbench", about = "Run registered microbenchmarks.")]
pub struct Arguments {
    /// Run only benchmarks whose names match the regular expression.
    #[arg(long)]
    pub filter: Option<String>,

    /// Exclude benchmarks whose names match the regular expression.
    #[arg(long)]
    pub filter_not: Option<String>,

    /// Number of iterations to run.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Number of warm-up iterations to run.
    #[arg(long)]
    pub warmup_iterations: Option<usize>,

    /// Minimal time to run when automatically detecting the number of
    /// iterations.
    #[arg(long)]
    pub min_time: Option<f64>,

    /// Maximum number of iterations to run when automatically detecting
    /// the number of iterations.
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Time unit used to report the timing results (ns, us, ms, s).
    #[arg(long, value_parser = parse_time_unit)]
    pub time_unit: Option<TimeUnit>,

    /// Inverse time unit used to report throughput results (ns, us, ms, s).
    #[arg(long, value_parser = parse_time_unit)]
    pub inverse_time_unit: Option<TimeUnit>,

    /// Comma-separated list of column names to show.
    #[arg(long)]
    pub columns: Option<String>,

    /// Output format (valid values are: console, csv, json, none).
    #[arg(long, value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,

    /// Only print final benchmark results.
    #[arg(long)]
    pub quiet: bool,
}

fn parse_time_unit(text: &str) -> Result<TimeUnit, String> {
    text.parse()
}

fn parse_output_format(text: &str) -> Result<OutputFormat, String> {
    text.parse()
}

impl Arguments {
    /// The caller-overrides settings layer these flags describe.
    pub fn settings(&self) -> Vec<Setting> {
        let mut settings = Vec::new();

        if let Some(value) = &self.filter {
            settings.push(Setting::Filter(value.clone()));
        }
        if let Some(value) = &self.filter_not {
            settings.push(Setting::FilterNot(value.clone()));
        }
        if let Some(value) = self.iterations {
            settings.push(Setting::Iterations(value));
        }
        if let Some(value) = self.warmup_iterations {
            settings.push(Setting::WarmupIterations(value));
        }
        if let Some(value) = self.min_time {
            settings.push(Setting::MinTime(value));
        }
        if let Some(value) = self.max_iterations {
            settings.push(Setting::MaxIterations(value));
        }
        if let Some(value) = self.time_unit {
            settings.push(Setting::TimeUnit(value));
        }
        if let Some(value) = self.inverse_time_unit {
            settings.push(Setting::InverseTimeUnit(value));
        }
        if let Some(value) = &self.columns {
            let names = value.split(',').map(str::to_string).collect();
            settings.push(Setting::Columns(names));
        }
        if let Some(value) = self.format {
            settings.push(Setting::Format(value));
        }
        if self.quiet {
            settings.push(Setting::Quiet(true));
        }

        settings
    }
}
