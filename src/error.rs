//! Error types for channel setup and scenario I/O.

use thiserror::Error;

/// Errors raised before a run reaches the numerical engine.
///
/// The engine itself never fails: non-convergence is a flag on
/// [`crate::solver::DepthSolution`] and early stops are a
/// [`crate::integrator::Termination`] on the profile.
#[derive(Error, Debug)]
pub enum GvfError {
    #[error("Invalid channel: {what}")]
    InvalidChannel { what: String },

    #[error("Invalid run: {what}")]
    InvalidRun { what: String },

    #[error("Scenario line {line}: {what}")]
    Scenario { line: usize, what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type GvfResult<T> = Result<T, GvfError>;
