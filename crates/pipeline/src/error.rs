use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("unsupported input: {0}")]
    UnsupportedInput(PathBuf),

    #[error("failed to read build graph from {path}: {reason}")]
    BuildGraph { path: PathBuf, reason: String },

    #[error("{0}")]
    Other(String),
}
