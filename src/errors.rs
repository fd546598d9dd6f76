use std::io;
use thiserror::Error;

/// Error type for invalid inputs, numerical failures and convergence problems.
#[derive(Error, Debug)]
pub enum VleError {
    // errors related to the input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // errors related to the evaluation of the models
    #[error("`{function}` is not defined for argument {argument}.")]
    DomainError {
        function: &'static str,
        argument: f64,
    },
    #[error("Root extraction of the cubic equation failed: {0}")]
    EosRootError(String),

    // errors related to algorithms
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error("`{0}` encountered illegal values during the iteration.")]
    IterationFailed(String),

    // errors related to file handling
    #[error(transparent)]
    FileIO(#[from] io::Error),

    // json errors
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    // errors related to parameter handling
    #[error("The following component(s) were not found: {0}")]
    ComponentsNotFound(String),
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
}

impl VleError {
    pub(crate) fn domain(function: &'static str, argument: f64) -> Self {
        Self::DomainError { function, argument }
    }
}

/// Convenience type for `Result<T, VleError>`.
pub type VleResult<T> = Result<T, VleError>;
