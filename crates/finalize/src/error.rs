use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinalizeError>;

#[derive(Error, Debug)]
pub enum FinalizeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("walk error: {0}")]
    WalkError(#[from] walkdir::Error),
}
