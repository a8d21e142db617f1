//! Evaluating columns over results into a report grid.

use std::collections::{BTreeMap, BTreeSet};

use microbench_core::{BenchmarkResult, ConfigError};

use crate::column::{Column, ColumnRegistry, Content, Expr, Unit};
use crate::format::Formatter;

/// One evaluated report cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Already-formatted text (pretty mode, and name cells).
    Text(String),
    /// Raw unit-adjusted value (machine-readable formats).
    Number(f64),
}

impl Cell {
    /// The cell as display text.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => value.to_string(),
        }
    }
}

/// Evaluated rows and the ordered union of the columns they use.
///
/// Results may request different column sets; a row simply has no entry for
/// a column it does not use.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Columns in first-use order.
    pub columns: Vec<Column>,
    /// One map of column name to cell per result.
    pub rows: Vec<BTreeMap<String, Cell>>,
}

/// Evaluate all cells for all results.
///
/// Each result uses its own configured columns, falling back to the default
/// set; every value is scaled by that result's own time units. `pretty`
/// selects formatted text cells (console) over raw numeric cells (CSV,
/// JSON).
pub fn evaluate(
    results: &[BenchmarkResult],
    registry: &ColumnRegistry,
    pretty: bool,
) -> Result<Grid, ConfigError> {
    let defaults = default_columns(results, registry);

    let mut columns: Vec<Column> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut rows = Vec::with_capacity(results.len());

    for result in results {
        let result_columns = match result.settings.columns() {
            Some(specs) => specs
                .iter()
                .map(|spec| registry.parse(spec))
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.clone(),
        };

        let mut row = BTreeMap::new();
        for column in result_columns {
            if seen.insert(column.name.clone()) {
                columns.push(column.clone());
            }

            let cell = match &column.content {
                Content::BenchmarkName => Cell::Text(result.qualified_name()),
                Content::Value(expr) => {
                    let adjusted = adjust(expr.evaluate(result), expr.unit(), result);
                    if pretty {
                        Cell::Text(column.formatter.apply(adjusted, &result.settings))
                    } else {
                        Cell::Number(adjusted)
                    }
                }
            };
            row.insert(column.name.clone(), cell);
        }
        rows.push(row);
    }

    Ok(Grid { columns, rows })
}

/// Scale a raw value into the units the result was configured to report.
fn adjust(value: f64, unit: Unit, result: &BenchmarkResult) -> f64 {
    match unit {
        Unit::Time => value / result.settings.time_unit().nanos_per_unit(),
        Unit::InverseTime => value * result.settings.inverse_time_unit().nanos_per_unit(),
        Unit::Percentage | Unit::None => value,
    }
}

/// The column set shown when no `--columns` flag was provided: name, time,
/// std and iterations, plus warmup when any result recorded warmup
/// measurements, plus one trailing column per counter name.
fn default_columns(results: &[BenchmarkResult], registry: &ColumnRegistry) -> Vec<Column> {
    let mut counters: BTreeSet<&str> = BTreeSet::new();
    let mut show_warmup = false;
    for result in results {
        show_warmup = show_warmup || !result.warmup_measurements.is_empty();
        for counter in result.counters.keys() {
            counters.insert(counter);
        }
    }

    let mut columns = Vec::new();
    for name in ["name", "time", "std", "iterations"] {
        if let Some(column) = registry.get(name) {
            columns.push(column.clone());
        }
    }
    if show_warmup {
        if let Some(column) = registry.get("warmup") {
            columns.push(column.clone());
        }
    }
    for counter in counters {
        columns.push(
            Column::new(counter, Expr::Counter(counter.to_string()))
                .formatted(Formatter::Integer),
        );
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use microbench_core::{BenchmarkSettings, Setting, TimeUnit};
    use std::collections::HashMap;

    fn result(settings: BenchmarkSettings) -> BenchmarkResult {
        BenchmarkResult {
            benchmark_name: "append".to_string(),
            suite_name: "strings".to_string(),
            settings,
            measurements: vec![1000.0, 2000.0],
            warmup_measurements: vec![],
            counters: HashMap::new(),
        }
    }

    #[test]
    fn test_default_grid() {
        let grid = evaluate(
            &[result(BenchmarkSettings::default())],
            &ColumnRegistry::default(),
            true,
        )
        .unwrap();

        let names: Vec<_> = grid.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["name", "time", "std", "iterations"]);

        let row = &grid.rows[0];
        assert_eq!(row["name"], Cell::Text("strings.append".to_string()));
        assert_eq!(row["time"], Cell::Text("1500 ns".to_string()));
        assert_eq!(row["std"], Cell::Text("± 47.14 %".to_string()));
        assert_eq!(row["iterations"], Cell::Text("2".to_string()));
    }

    #[test]
    fn test_time_unit_scaling_is_per_result() {
        let ns = result(BenchmarkSettings::default());
        let us = result(BenchmarkSettings::from_settings(&[Setting::TimeUnit(
            TimeUnit::Microseconds,
        )]));

        let grid = evaluate(&[ns, us], &ColumnRegistry::default(), true).unwrap();
        assert_eq!(grid.rows[0]["time"], Cell::Text("1500 ns".to_string()));
        assert_eq!(grid.rows[1]["time"], Cell::Text("1.5 us".to_string()));
    }

    #[test]
    fn test_raw_mode_keeps_numbers() {
        let grid = evaluate(
            &[result(BenchmarkSettings::default())],
            &ColumnRegistry::default(),
            false,
        )
        .unwrap();
        assert_eq!(grid.rows[0]["time"], Cell::Number(1500.0));
        assert_eq!(
            grid.rows[0]["name"],
            Cell::Text("strings.append".to_string())
        );
    }

    #[test]
    fn test_counters_and_warmup_extend_defaults() {
        let mut r = result(BenchmarkSettings::default());
        r.warmup_measurements = vec![500.0];
        r.counters.insert("items".to_string(), 42.0);

        let grid = evaluate(&[r], &ColumnRegistry::default(), true).unwrap();
        let names: Vec<_> = grid.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["name", "time", "std", "iterations", "warmup", "items"]
        );
        assert_eq!(grid.rows[0]["items"], Cell::Text("42".to_string()));
    }

    #[test]
    fn test_configured_columns_override_defaults() {
        let settings = BenchmarkSettings::from_settings(&[Setting::Columns(vec![
            "name".to_string(),
            "min".to_string(),
            "max".to_string(),
        ])]);
        let grid = evaluate(&[result(settings)], &ColumnRegistry::default(), true).unwrap();

        let names: Vec<_> = grid.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["name", "min", "max"]);
        assert_eq!(grid.rows[0]["min"], Cell::Text("1000 ns".to_string()));
        assert_eq!(grid.rows[0]["max"], Cell::Text("2000 ns".to_string()));
    }

    #[test]
    fn test_unknown_configured_column_fails() {
        let settings =
            BenchmarkSettings::from_settings(&[Setting::Columns(vec!["bogus".to_string()])]);
        let err = evaluate(&[result(settings)], &ColumnRegistry::default(), true).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColumn(name) if name == "bogus"));
    }
}
