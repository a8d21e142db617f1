//! Report columns and the column expression language.
//!
//! A column is a named, aligned report field whose content is either the
//! benchmark name or a typed value expression over a result. Expressions
//! are written as dot-separated paths over the `time` and `warmupTime`
//! measurement series and the result's counters, for example:
//!
//! ```text
//! time.median
//! warmupTime.sum
//! counter.bytes.div.time.sum
//! percentage.time.std.divide.time.median
//! ```
//!
//! Unparenthesized chains apply left-to-right. All parse errors surface at
//! configuration time, before any benchmark executes.

use std::collections::BTreeMap;

use microbench_core::{BenchmarkResult, ConfigError};

use crate::format::Formatter;

/// Dimension of an expression's value, used for unit-aware formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Nanoseconds, scaled to the result's configured time unit.
    Time,
    /// Per-nanosecond, scaled to the result's configured inverse time unit.
    InverseTime,
    /// A ratio multiplied by 100.
    Percentage,
    /// Dimensionless.
    None,
}

/// Visual alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Pad on the right.
    Left,
    /// Pad on the left.
    Right,
}

/// Which measurement series an expression starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// The main measurement batch.
    Time,
    /// The warmup batch.
    WarmupTime,
}

/// One aggregation step over a measurement series.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    /// Median of the series.
    Median,
    /// Sample standard deviation of the series.
    Std,
    /// Smallest element, `0` for an empty series.
    Min,
    /// Largest element, `0` for an empty series.
    Max,
    /// Sum of the series.
    Sum,
    /// Arithmetic mean of the series.
    Average,
    /// Interpolated percentile of the series.
    Percentile(f64),
    /// Number of elements in the series.
    Iterations,
}

impl Aggregate {
    fn apply(&self, samples: &[f64]) -> f64 {
        match self {
            Aggregate::Median => microbench_stats::median(samples),
            Aggregate::Std => microbench_stats::std(samples),
            Aggregate::Min => samples
                .iter()
                .copied()
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .unwrap_or(0.0),
            Aggregate::Max => samples
                .iter()
                .copied()
                .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .unwrap_or(0.0),
            Aggregate::Sum => microbench_stats::sum(samples),
            Aggregate::Average => microbench_stats::mean(samples),
            Aggregate::Percentile(p) => microbench_stats::percentile(*p, samples),
            Aggregate::Iterations => samples.len() as f64,
        }
    }
}

/// A typed value expression over one benchmark result.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An aggregation chain over a measurement series, applied
    /// left-to-right; after the first step, later steps see the previous
    /// scalar as a singleton series.
    Series {
        /// Series the chain starts from.
        base: Base,
        /// Aggregation steps, at least one.
        ops: Vec<Aggregate>,
    },
    /// A named counter's final value, `0` when never set.
    Counter(String),
    /// The inner value multiplied by 100 and tagged as a percentage.
    Percentage(Box<Expr>),
    /// Left value divided by right value.
    Divide(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate against one result.
    pub fn evaluate(&self, result: &BenchmarkResult) -> f64 {
        match self {
            Expr::Series { base, ops } => {
                let series: &[f64] = match base {
                    Base::Time => &result.measurements,
                    Base::WarmupTime => &result.warmup_measurements,
                };
                let mut value = ops[0].apply(series);
                for op in &ops[1..] {
                    value = op.apply(&[value]);
                }
                value
            }
            Expr::Counter(name) => result.counters.get(name).copied().unwrap_or(0.0),
            Expr::Percentage(inner) => inner.evaluate(result) * 100.0,
            Expr::Divide(left, right) => left.evaluate(result) / right.evaluate(result),
        }
    }

    /// Dimension of the value this expression produces.
    pub fn unit(&self) -> Unit {
        match self {
            Expr::Series { ops, .. } => match ops.last() {
                Some(Aggregate::Iterations) => Unit::None,
                _ => Unit::Time,
            },
            Expr::Counter(_) => Unit::None,
            Expr::Percentage(_) => Unit::Percentage,
            Expr::Divide(left, right) => match (left.unit(), right.unit()) {
                (unit, Unit::None) => unit,
                (Unit::None, Unit::Time) => Unit::InverseTime,
                _ => Unit::None,
            },
        }
    }
}

/// What a column shows for each result.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// The qualified benchmark name.
    BenchmarkName,
    /// A value expression.
    Value(Expr),
}

/// A named, aligned report field.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Name shown in the output header.
    pub name: String,
    /// What the column shows.
    pub content: Content,
    /// Cell alignment.
    pub alignment: Alignment,
    /// Formatter used for pretty output.
    pub formatter: Formatter,
}

impl Column {
    /// Value column, right-aligned, with a formatter derived from the
    /// expression's unit.
    pub fn new(name: impl Into<String>, expr: Expr) -> Self {
        let formatter = match expr.unit() {
            Unit::Time => Formatter::Time,
            Unit::InverseTime => Formatter::InverseTime,
            Unit::Percentage => Formatter::Percentage,
            Unit::None => Formatter::Real,
        };
        Self {
            name: name.into(),
            content: Content::Value(expr),
            alignment: Alignment::Right,
            formatter,
        }
    }

    /// Column showing the qualified benchmark name.
    pub fn benchmark_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Content::BenchmarkName,
            alignment: Alignment::Left,
            formatter: Formatter::Real,
        }
    }

    /// Same column with a different alignment.
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Same column with an explicit formatter.
    pub fn formatted(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Unit of the column's value, [`Unit::None`] for name columns.
    pub fn unit(&self) -> Unit {
        match &self.content {
            Content::BenchmarkName => Unit::None,
            Content::Value(expr) => expr.unit(),
        }
    }
}

/// Mapping from known column names to their definitions.
///
/// Constructed once at process start and threaded explicitly through the
/// reporting calls; callers may register custom columns before a run, but
/// never during one.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: BTreeMap<String, Column>,
}

impl ColumnRegistry {
    /// Registry with no columns at all.
    pub fn empty() -> Self {
        Self {
            columns: BTreeMap::new(),
        }
    }

    /// Add a column under its own name, replacing any previous definition.
    pub fn register(&mut self, column: Column) {
        self.columns.insert(column.name.clone(), column);
    }

    fn insert(&mut self, key: &str, column: Column) {
        self.columns.insert(key.to_string(), column);
    }

    /// Look up a column by name.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Resolve one textual column specification: either a registered name
    /// or a `name=expr` definition with optional alignment colons.
    pub fn parse(&self, spec: &str) -> Result<Column, ConfigError> {
        let Some((name, body)) = spec.split_once('=') else {
            return self
                .get(spec)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownColumn(spec.to_string()));
        };

        let name = name.trim();
        let mut body = body.trim();
        let mut alignment = Alignment::Right;
        if let Some(stripped) = body.strip_prefix(':') {
            body = stripped;
            alignment = Alignment::Left;
        }
        if let Some(stripped) = body.strip_suffix(':') {
            body = stripped;
            alignment = Alignment::Right;
        }
        if name.is_empty() || body.is_empty() {
            return Err(ConfigError::MalformedColumn {
                spec: spec.to_string(),
                reason: "expected `name=expr`".to_string(),
            });
        }

        if body == "name" {
            return Ok(Column::benchmark_name(name).aligned(alignment));
        }

        let tokens: Vec<&str> = body.split('.').collect();
        let expr = parse_value_path(&tokens, spec)?;
        Ok(Column::new(name, expr).aligned(alignment))
    }
}

impl Default for ColumnRegistry {
    /// The default column set: `name`, `time`, `std`, `iterations`,
    /// `warmup`, the opt-in alternatives (`median`, `min`, `max`, `total`,
    /// `avg`/`average`, `std_abs`), and percentiles `p0`..`p100` plus the
    /// extreme tails.
    fn default() -> Self {
        let mut registry = Self::empty();

        registry.register(Column::benchmark_name("name"));
        registry.register(Column::new("time", series(Base::Time, Aggregate::Median)));
        registry.register(
            Column::new("std", relative_std()).aligned(Alignment::Left),
        );
        registry.register(
            Column::new("iterations", series(Base::Time, Aggregate::Iterations))
                .formatted(Formatter::Integer),
        );
        registry.register(Column::new(
            "warmup",
            series(Base::WarmupTime, Aggregate::Sum),
        ));

        registry.register(Column::new("median", series(Base::Time, Aggregate::Median)));
        registry.register(Column::new("min", series(Base::Time, Aggregate::Min)));
        registry.register(Column::new("max", series(Base::Time, Aggregate::Max)));
        registry.register(Column::new("total", series(Base::Time, Aggregate::Sum)));
        registry.register(Column::new("avg", series(Base::Time, Aggregate::Average)));
        // `average` is an alias resolving to the same `avg` column.
        registry.insert(
            "average",
            Column::new("avg", series(Base::Time, Aggregate::Average)),
        );
        registry.register(
            Column::new("std_abs", series(Base::Time, Aggregate::Std))
                .aligned(Alignment::Left)
                .formatted(Formatter::Std),
        );

        let mut percentiles: Vec<f64> = (0..=100).map(f64::from).collect();
        percentiles.extend([99.9, 99.99, 99.999, 99.9999]);
        for p in percentiles {
            registry.register(Column::new(
                format!("p{p}"),
                series(Base::Time, Aggregate::Percentile(p)),
            ));
        }

        registry
    }
}

fn series(base: Base, op: Aggregate) -> Expr {
    Expr::Series {
        base,
        ops: vec![op],
    }
}

/// Relative standard deviation in percent: `std / median * 100`.
fn relative_std() -> Expr {
    Expr::Percentage(Box::new(Expr::Divide(
        Box::new(series(Base::Time, Aggregate::Std)),
        Box::new(series(Base::Time, Aggregate::Median)),
    )))
}

fn parse_value_path(tokens: &[&str], spec: &str) -> Result<Expr, ConfigError> {
    let malformed = |reason: &str| ConfigError::MalformedColumn {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    if tokens.is_empty() {
        return Err(malformed("empty value path"));
    }
    // A percentage prefix wraps the remainder of the path.
    if tokens[0] == "percentage" {
        if tokens.len() == 1 {
            return Err(malformed("`percentage` needs a value path"));
        }
        return Ok(Expr::Percentage(Box::new(parse_value_path(
            &tokens[1..],
            spec,
        )?)));
    }

    let mut i = 0;
    let mut expr = parse_node(tokens, &mut i, spec)?;
    while i < tokens.len() {
        match tokens[i] {
            "div" | "divide" => {
                i += 1;
                if i == tokens.len() {
                    return Err(malformed("dangling divide"));
                }
                // Right-hand side may itself be percentage-wrapped, in
                // which case it consumes the remainder of the path.
                let right = if tokens[i] == "percentage" {
                    let right = parse_value_path(&tokens[i..], spec)?;
                    i = tokens.len();
                    right
                } else {
                    parse_node(tokens, &mut i, spec)?
                };
                expr = Expr::Divide(Box::new(expr), Box::new(right));
            }
            other => return Err(ConfigError::UnknownOperator(other.to_string())),
        }
    }
    Ok(expr)
}

/// Parse one `counter.<name>` or `base.op[.op]*` node at `tokens[*i]`.
fn parse_node(tokens: &[&str], i: &mut usize, spec: &str) -> Result<Expr, ConfigError> {
    let malformed = |reason: String| ConfigError::MalformedColumn {
        spec: spec.to_string(),
        reason,
    };

    match tokens[*i] {
        "counter" => {
            *i += 1;
            let name = tokens
                .get(*i)
                .ok_or_else(|| malformed("`counter` needs a counter name".to_string()))?;
            *i += 1;
            Ok(Expr::Counter((*name).to_string()))
        }
        "time" | "warmupTime" => {
            let base = if tokens[*i] == "time" {
                Base::Time
            } else {
                Base::WarmupTime
            };
            *i += 1;
            let mut ops = Vec::new();
            while *i < tokens.len() {
                match parse_aggregate(tokens, i)? {
                    Some(op) => ops.push(op),
                    None => break,
                }
            }
            if ops.is_empty() {
                if *i < tokens.len() {
                    return Err(ConfigError::UnknownOperator(tokens[*i].to_string()));
                }
                return Err(malformed(
                    "a series base needs at least one operator".to_string(),
                ));
            }
            Ok(Expr::Series { base, ops })
        }
        other => Err(malformed(format!("unknown value base `{other}`"))),
    }
}

/// Parse one aggregation token at `tokens[*i]`, advancing past it.
///
/// Returns `Ok(None)` when the token is not an operator (leaving `i`
/// untouched), so the caller can decide whether a divide or an error
/// follows. Percentile operators with a fractional part span two tokens
/// (`p99.9` splits at the path separator).
fn parse_aggregate(tokens: &[&str], i: &mut usize) -> Result<Option<Aggregate>, ConfigError> {
    let token = tokens[*i];
    let op = match token {
        "median" => Aggregate::Median,
        "std" => Aggregate::Std,
        "min" => Aggregate::Min,
        "max" => Aggregate::Max,
        "sum" | "total" => Aggregate::Sum,
        "avg" | "average" => Aggregate::Average,
        "iterations" => Aggregate::Iterations,
        p if p.len() > 1
            && p.starts_with('p')
            && p[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            let mut text = p[1..].to_string();
            // A following all-digit token is the fractional part.
            if let Some(fraction) = tokens.get(*i + 1) {
                if !fraction.is_empty() && fraction.chars().all(|c| c.is_ascii_digit()) {
                    text = format!("{text}.{fraction}");
                    *i += 1;
                }
            }
            let value: f64 = text
                .parse()
                .map_err(|_| ConfigError::InvalidPercentile(p.to_string()))?;
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidPercentile(format!("p{text}")));
            }
            Aggregate::Percentile(value)
        }
        _ => return Ok(None),
    };
    *i += 1;
    Ok(Some(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use microbench_core::BenchmarkSettings;
    use std::collections::HashMap;

    fn result(measurements: Vec<f64>) -> BenchmarkResult {
        BenchmarkResult {
            benchmark_name: "bench".to_string(),
            suite_name: "suite".to_string(),
            settings: BenchmarkSettings::default(),
            measurements,
            warmup_measurements: vec![],
            counters: HashMap::new(),
        }
    }

    fn parse(spec: &str) -> Column {
        ColumnRegistry::default().parse(spec).unwrap()
    }

    #[test]
    fn test_registered_name_lookup() {
        let column = parse("time");
        assert_eq!(column.name, "time");
        assert_eq!(column.unit(), Unit::Time);
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = ColumnRegistry::default().parse("bogus").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColumn(_)));
    }

    #[test]
    fn test_median_path_round_trip() {
        let column = parse("t=time.median");
        let value = match &column.content {
            Content::Value(expr) => expr.evaluate(&result(vec![1000.0, 2000.0])),
            Content::BenchmarkName => unreachable!(),
        };
        let settings = BenchmarkSettings::default();
        assert_eq!(column.formatter.apply(value, &settings), "1500 ns");
    }

    #[test]
    fn test_relative_std_round_trip() {
        let column = parse("spread=percentage.time.std.divide.time.median");
        let value = match &column.content {
            Content::Value(expr) => expr.evaluate(&result(vec![1000.0, 2000.0])),
            Content::BenchmarkName => unreachable!(),
        };
        let settings = BenchmarkSettings::default();
        assert_eq!(column.formatter.apply(value, &settings), "± 47.14 %");
    }

    #[test]
    fn test_default_std_column_matches_expression_form() {
        let registry = ColumnRegistry::default();
        let builtin = registry.get("std").unwrap();
        let parsed = registry
            .parse("std=:percentage.time.std.divide.time.median")
            .unwrap();
        assert_eq!(builtin.content, parsed.content);
        assert_eq!(builtin.alignment, Alignment::Left);
    }

    #[test]
    fn test_counter_division_yields_inverse_time() {
        let column = parse("throughput=counter.items.div.time.sum");
        let expr = match &column.content {
            Content::Value(expr) => expr,
            Content::BenchmarkName => unreachable!(),
        };
        assert_eq!(expr.unit(), Unit::InverseTime);

        let mut result = result(vec![500_000_000.0, 500_000_000.0]);
        result.counters.insert("items".to_string(), 100.0);
        // 100 items over 1e9 ns, reported per second.
        assert_eq!(expr.evaluate(&result), 1e-7);
    }

    #[test]
    fn test_fractional_percentile_spans_tokens() {
        let column = parse("tail=time.p99.9");
        assert_eq!(
            column.content,
            Content::Value(Expr::Series {
                base: Base::Time,
                ops: vec![Aggregate::Percentile(99.9)],
            })
        );
    }

    #[test]
    fn test_alignment_colons() {
        assert_eq!(parse("n=:name").alignment, Alignment::Left);
        assert_eq!(parse("t=time.median:").alignment, Alignment::Right);
        assert_eq!(parse("t=time.median").alignment, Alignment::Right);
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = ColumnRegistry::default()
            .parse("t=time.median.harmonic")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOperator(name) if name == "harmonic"));
    }

    #[test]
    fn test_out_of_range_percentile_is_rejected() {
        let err = ColumnRegistry::default().parse("t=time.p101").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPercentile(_)));
    }

    #[test]
    fn test_warmup_base() {
        let column = parse("w=warmupTime.sum");
        let mut r = result(vec![]);
        r.warmup_measurements = vec![100.0, 200.0];
        match &column.content {
            Content::Value(expr) => assert_eq!(expr.evaluate(&r), 300.0),
            Content::BenchmarkName => unreachable!(),
        }
    }

    #[test]
    fn test_iterations_operator_is_dimensionless() {
        let column = parse("n=time.iterations");
        assert_eq!(column.unit(), Unit::None);
        match &column.content {
            Content::Value(expr) => {
                assert_eq!(expr.evaluate(&result(vec![1.0, 2.0, 3.0])), 3.0)
            }
            Content::BenchmarkName => unreachable!(),
        }
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = ColumnRegistry::default();
        registry.register(Column::new(
            "worst",
            Expr::Series {
                base: Base::Time,
                ops: vec![Aggregate::Max],
            },
        ));
        assert!(registry.get("worst").is_some());
        assert!(registry.parse("worst").is_ok());
    }
}
