#![warn(missing_docs)]
//! Microbench Report - Columns and Output
//!
//! Turns completed benchmark results into report output:
//! - A typed column expression language (parse, evaluate, format)
//! - An explicit column registry with the default column set
//! - Console table, CSV, and JSON renderers over the evaluated grid

mod column;
mod console;
mod csv;
mod format;
mod grid;
mod json;

pub use column::{
    Aggregate, Alignment, Base, Column, ColumnRegistry, Content, Expr, Unit,
};
pub use format::Formatter;
pub use grid::{evaluate, Cell, Grid};

use std::io::Write;

use microbench_core::{BenchmarkResult, BenchmarkSettings, OutputFormat};

/// Render results in the configured output format.
///
/// Console output uses pretty formatted cells; CSV and JSON carry raw
/// unit-adjusted values. [`OutputFormat::None`] emits nothing.
pub fn render_report(
    results: &[BenchmarkResult],
    registry: &ColumnRegistry,
    settings: &BenchmarkSettings,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match settings.format() {
        OutputFormat::Console => {
            let grid = evaluate(results, registry, true)?;
            console::render(&grid, out)?;
        }
        OutputFormat::Csv => {
            let grid = evaluate(results, registry, false)?;
            csv::render(&grid, out)?;
        }
        OutputFormat::Json => {
            let grid = evaluate(results, registry, false)?;
            json::render(&grid, out)?;
        }
        OutputFormat::None => {}
    }
    Ok(())
}
