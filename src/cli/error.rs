//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::UnknownExample(_) => crate::exitcode::USAGE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::ThreadPool { .. } => crate::exitcode::SOFTWARE,
                ApplicationError::Domain(d) => match d {
                    DomainError::InvalidDecimal { .. } => crate::exitcode::DATAERR,
                    DomainError::EmptySequence { .. } | DomainError::Overflow { .. } => {
                        crate::exitcode::SOFTWARE
                    }
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_example_is_usage_error() {
        let err = CliError::from(ApplicationError::UnknownExample("nope".into()));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn empty_sequence_is_software_error() {
        let err = CliError::from(ApplicationError::from(DomainError::EmptySequence {
            operation: "min",
        }));
        assert_eq!(err.exit_code(), crate::exitcode::SOFTWARE);
    }
}
