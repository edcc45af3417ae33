//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the content directory
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Cannot read content directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Content path {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Cannot read article {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse talks {path:?}: {source}")]
    Talks {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}
