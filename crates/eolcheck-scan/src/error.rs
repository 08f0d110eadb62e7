//! Error types for eolcheck-scan

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scanning a project or host
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan root (or a directory inside it) could not be listed
    #[error("cannot read directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file exists but could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest could not be parsed
    #[error("failed to parse {file}: {detail}")]
    Parse { file: String, detail: String },
}

impl ScanError {
    pub fn parse(file: &str, detail: impl std::fmt::Display) -> Self {
        ScanError::Parse {
            file: file.to_string(),
            detail: detail.to_string(),
        }
    }
}
