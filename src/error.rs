//! Error types.
//!
//! Infeasibility, cancellation and statically empty domains are ordinary
//! outcomes (see [`crate::search::SolveOutcome`]). The types here cover what
//! a caller cannot act on by reading the result: malformed input or
//! configuration, and engine defects.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the solve entry points.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The problem failed structural validation.
    #[error("invalid problem: {}", join(.0))]
    InvalidProblem(Vec<ValidationError>),

    /// The solver configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Trail or domain bookkeeping went out of sync, or an accepted
    /// assignment failed full evaluation.
    #[error("internal invariant violated: {context}")]
    InternalInvariantViolation {
        /// What was being done when the inconsistency was found.
        context: String,
    },

    /// The worker thread terminated without producing a result.
    #[error("solver worker panicked")]
    WorkerPanicked,
}

impl SolverError {
    pub(crate) fn invariant(context: impl Into<String>) -> Self {
        Self::InternalInvariantViolation {
            context: context.into(),
        }
    }
}

/// Rejected [`crate::search::SolverConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `progress_interval` must be at least 1.
    #[error("progress_interval must be positive")]
    ZeroProgressInterval,

    /// `node_budget` must be at least 1 when set.
    #[error("node_budget must be positive")]
    ZeroNodeBudget,

    /// A duration setting was zero.
    #[error("{0} must be a positive duration")]
    ZeroDuration(&'static str),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
