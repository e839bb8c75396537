//! CLI-level errors (wraps infrastructure errors)

use serde_json::error::Category;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(_) => exitcode::DATAERR,
                ApplicationError::InputNotFound(_) => exitcode::NOINPUT,
                ApplicationError::InvalidEncoding { .. } => exitcode::DATAERR,
                ApplicationError::OutputNotWritable { .. } => exitcode::CANTCREAT,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::Serialization { source, .. } => match source.classify() {
                    Category::Io => exitcode::IOERR,
                    Category::Syntax | Category::Data | Category::Eof => exitcode::DATAERR,
                },
                ApplicationError::OperationFailed { source, .. } => {
                    if source.is::<std::io::Error>() {
                        exitcode::IOERR
                    } else {
                        exitcode::SOFTWARE
                    }
                }
            },
        }
    }

    /// Message followed by every underlying cause, `: `-separated.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
