//! Errors raised while preparing a file for streaming

use std::path::PathBuf;
use thiserror::Error;

/// Failure between path resolution and the response head. Maps to 500.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },
}
