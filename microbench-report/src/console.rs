//! Aligned console table output.

use std::io::{self, Write};

use crate::column::Alignment;
use crate::grid::Grid;

/// Render the grid as an aligned table with a header row and separator.
pub fn render(grid: &Grid, out: &mut dyn Write) -> io::Result<()> {
    let widths: Vec<usize> = grid
        .columns
        .iter()
        .map(|column| {
            grid.rows
                .iter()
                .filter_map(|row| row.get(&column.name))
                .map(|cell| cell.render().len())
                .chain(std::iter::once(column.name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    writeln!(out)?;
    for (index, column) in grid.columns.iter().enumerate() {
        write_cell(out, &column.name, widths[index], Alignment::Left)?;
    }
    writeln!(out)?;

    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(total))?;

    for row in &grid.rows {
        for (index, column) in grid.columns.iter().enumerate() {
            let content = row
                .get(&column.name)
                .map(|cell| cell.render())
                .unwrap_or_default();
            write_cell(out, &content, widths[index], column.alignment)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_cell(
    out: &mut dyn Write,
    content: &str,
    width: usize,
    alignment: Alignment,
) -> io::Result<()> {
    match alignment {
        Alignment::Left => write!(out, "{content:<width$}  "),
        Alignment::Right => write!(out, "{content:>width$}  "),
    }
}
