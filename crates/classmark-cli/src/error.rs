//! CLI error types.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    ReadStdin(std::io::Error),

    #[error("failed to write stylesheet to {path}: {source}")]
    WriteCss {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode diagnostics: {0}")]
    Json(#[from] serde_json::Error),
}
