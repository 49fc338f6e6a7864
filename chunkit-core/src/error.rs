use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure a split, join or inspection can end in. All of them are
/// terminal for the current invocation; partially written output is left
/// in place.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("cannot read source file {path:?}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write destination {path:?}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chunk {index} missing or unreadable ({path:?})")]
    ChunkMissing {
        index: u64,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("manifest not found at {0:?}")]
    ManifestNotFound(PathBuf),

    #[error("malformed manifest {path:?}: {reason}")]
    ManifestMalformed { path: PathBuf, reason: String },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

pub type Result<T> = std::result::Result<T, ChunkError>;

impl ChunkError {
    pub(crate) fn source_unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChunkError::SourceUnreadable { path: path.into(), source }
    }

    pub(crate) fn destination_unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChunkError::DestinationUnwritable { path: path.into(), source }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ChunkError::ManifestMalformed { path: path.into(), reason: reason.into() }
    }
}
