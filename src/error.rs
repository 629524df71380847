//! Crate-wide error type

use std::path::PathBuf;

/// Errors produced while simulating, storing or viewing ensembles
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pickle error: {0}")]
    Pickle(#[from] serde_pickle::Error),

    #[error("manifest error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset contains no paths")]
    EmptyDataset,

    /// Every path must have the same number of steps
    #[error("path {path} has {found} points, expected {expected}")]
    RaggedDataset {
        path: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("viewer error: {0}")]
    Viewer(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
