//! CSV output with raw cell values.

use std::io::{self, Write};

use crate::grid::Grid;

/// Render the grid as CSV: a header row of column names, then one row of
/// raw values per result.
pub fn render(grid: &Grid, out: &mut dyn Write) -> io::Result<()> {
    let header: Vec<String> = grid
        .columns
        .iter()
        .map(|column| escape(&column.name))
        .collect();
    writeln!(out, "{}", header.join(","))?;

    for row in &grid.rows {
        let cells: Vec<String> = grid
            .columns
            .iter()
            .map(|column| {
                row.get(&column.name)
                    .map(|cell| escape(&cell.render()))
                    .unwrap_or_default()
            })
            .collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    Ok(())
}

fn escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnRegistry;
    use crate::grid::evaluate;
    use microbench_core::{BenchmarkResult, BenchmarkSettings};
    use std::collections::HashMap;

    #[test]
    fn test_csv_rows() {
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
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "name,time,std,iterations");
        assert!(lines[1].starts_with("strings.append,1500,"));
        assert!(lines[1].ends_with(",2"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
