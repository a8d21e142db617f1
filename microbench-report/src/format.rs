//! Cell formatters for human-readable console output.

use microbench_core::BenchmarkSettings;

/// How a column's numeric value is rendered in pretty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Whole number without decimals.
    Integer,
    /// Real number with up to three decimals.
    Real,
    /// Real number suffixed with the result's time unit.
    Time,
    /// Real number suffixed with the result's inverse time unit.
    InverseTime,
    /// Plus-or-minus percentage.
    Percentage,
    /// Plus-or-minus absolute deviation.
    Std,
}

impl Formatter {
    /// Render an already unit-adjusted value.
    pub fn apply(self, value: f64, settings: &BenchmarkSettings) -> String {
        match self {
            Formatter::Integer => format!("{value:.0}"),
            Formatter::Real => real(value),
            Formatter::Time => format!("{} {}", real(value), settings.time_unit()),
            Formatter::InverseTime => {
                format!("{} /{}", real(value), settings.inverse_time_unit())
            }
            Formatter::Percentage => format!("± {value:.2} %"),
            Formatter::Std => format!("± {}", real(value)),
        }
    }
}

/// Up to three decimals, with trailing zeros (and a bare trailing dot)
/// trimmed, so `1500.000` renders as `1500` and `0.470` as `0.47`.
fn real(value: f64) -> String {
    let rendered = format!("{value:.3}");
    if !rendered.contains('.') {
        return rendered;
    }
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
