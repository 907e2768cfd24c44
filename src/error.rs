use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to load one JSON file. Reported as an issue, never fatal.
///
/// Display shows only the underlying detail so it can be embedded in a
/// `Parse error: ...` message.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// A category index entry whose shape stops the rest of the index from being checked.
#[derive(Debug, Error)]
pub enum IndexEntryError {
    #[error("entry {index} is not a mapping")]
    NotAMapping { index: usize },
    #[error("entry {index} has a non-string icon: {icon}")]
    IconNotAPath { index: usize, icon: serde_json::Value },
}

/// Failures that prevent the scan from running at all.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("invalid dataset pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
