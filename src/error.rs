//! The crate's error taxonomy.

use thiserror::Error;

/// Errors surfaced by graph loading and perturbation.
///
/// Degenerate graphs (no nodes where a fraction would divide by zero) are not errors: the
/// bucketing layer reports an all-zero table for them instead.
#[derive(Debug, Error)]
pub enum Error {
    /// An edge-list line could not be parsed. Loader errors are fatal and carry the 1-based line
    /// number they occurred on.
    #[error("invalid edge list input at line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },

    /// The perturbation re-addition phase ran out of retry budget before placing every
    /// replacement edge. Recoverable: retry with a lower fraction or a larger budget.
    #[error(
        "perturbation infeasible: {remaining} replacement edge(s) unplaced after {attempts} attempts"
    )]
    PerturbationInfeasible { remaining: usize, attempts: usize },
}

/// A convenience alias for results over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
