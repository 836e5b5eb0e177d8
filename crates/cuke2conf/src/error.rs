//! CLI error types.

use cuke2conf_formatter::{FormatError, OptionsError};

use crate::finder::FinderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Options(#[from] OptionsError),

    #[error("{0}")]
    Finder(#[from] FinderError),

    #[error("{0}")]
    Parse(#[from] gherkin::ParseFileError),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
