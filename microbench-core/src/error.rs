//! Error taxonomy.
//!
//! Two distinct layers: [`ConfigError`] covers everything a caller can get
//! wrong before any benchmark executes, and [`RunError`] covers what happens
//! while a benchmark closure is running. The [`RunError::PlanSatisfied`]
//! variant is not a failure at all — it is the cooperative signal that stops
//! an explicit-measurement closure once its iteration target is reached, and
//! the driving loop consumes it before results are reported.

use thiserror::Error;

/// A configuration problem, surfaced before any benchmark executes.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A name filter or exclude pattern failed to compile.
    #[error("invalid filter pattern `{pattern}`: {source}")]
    InvalidFilter {
        /// The offending pattern as supplied by the caller.
        pattern: String,
        /// The underlying regex compile error.
        source: regex::Error,
    },

    /// A requested output column is not present in the registry.
    #[error("unknown output column `{0}`")]
    UnknownColumn(String),

    /// A column expression used an operator the grammar does not know.
    #[error("unknown column operator `{0}`")]
    UnknownOperator(String),

    /// A percentile suffix parsed but lies outside `[0, 100]`.
    #[error("invalid percentile `{0}`: must lie within [0, 100]")]
    InvalidPercentile(String),

    /// A column specification that does not fit the grammar.
    #[error("malformed column specification `{spec}`: {reason}")]
    MalformedColumn {
        /// The full specification string.
        spec: String,
        /// What exactly did not parse.
        reason: String,
    },

    /// A numeric setting that must be strictly positive was not.
    #[error("value provided via {flag} must be a positive {kind}")]
    NonPositive {
        /// Flag or setting name the value arrived through.
        flag: &'static str,
        /// Human description of the expected numeric kind.
        kind: &'static str,
    },
}

/// Outcome of running a benchmark closure.
#[derive(Debug, Error)]
pub enum RunError {
    /// The measurement plan is complete.
    ///
    /// Raised by the measurement state once its target iteration count is
    /// reached, so closures that loop on `measure` forever terminate. The
    /// benchmark loop matches on this variant and treats it as a clean
    /// stop; it never reaches reporting.
    #[error("measurement plan satisfied")]
    PlanSatisfied,

    /// The closure itself failed. Fatal: the run is aborted, with no retry
    /// or partial-result salvage.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}
