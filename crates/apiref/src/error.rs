//! CLI error types.

use apiref_model::ModelError;
use apiref_pages::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
