//! JSON output with raw cell values.

use std::io::Write;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::grid::{Cell, Grid};

/// Render the grid as a JSON document with a timestamp context and one
/// object per benchmark, keyed by column name.
pub fn render(grid: &Grid, out: &mut dyn Write) -> anyhow::Result<()> {
    let benchmarks: Vec<Value> = grid
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for column in &grid.columns {
                let Some(cell) = row.get(&column.name) else {
                    continue;
                };
                let value = match cell {
                    Cell::Text(text) => Value::String(text.clone()),
                    // Non-finite values have no JSON representation.
                    Cell::Number(number) => serde_json::Number::from_f64(*number)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                };
                object.insert(column.name.clone(), value);
            }
            Value::Object(object)
        })
        .collect();

    let document = serde_json::json!({
        "context": {
            "date": Utc::now().to_rfc3339(),
        },
        "benchmarks": benchmarks,
    });

    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnRegistry;
    use crate::grid::evaluate;
    use microbench_core::{BenchmarkResult, BenchmarkSettings};
    use std::collections::HashMap;

    #[test]
    fn test_json_document() {
        let result = BenchmarkResult {
            benchmark_name: "append".to_string(),
            suite_name: "strings".to_string(),
            settings: BenchmarkSettings::default(),
            measurements: vec![1000.0, 2000.0],
            warmup_measurements: vec![],
            counters: HashMap::new(),
        };
        let grid = evaluate(&[result], &ColumnRegistry::default(), false).unwrap();

        let mut buffer = Vec::new();
        render(&grid, &mut buffer).unwrap();
        let document: Value = serde_json::from_slice(&buffer).unwrap();

        assert!(document["context"]["date"].is_string());
        let benchmarks = document["benchmarks"].as_array().unwrap();
        assert_eq!(benchmarks.len(), 1);
        assert_eq!(benchmarks[0]["name"], "strings.append");
        assert_eq!(benchmarks[0]["time"], 1500.0);
        assert_eq!(benchmarks[0]["iterations"], 2.0);
    }
}
