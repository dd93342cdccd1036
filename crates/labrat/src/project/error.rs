//! Error type for project lifecycle operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::archive::ArchiveError;

/// Project operation errors
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("unrecognized project type: '{0}' (see `labrat config` for the allowed list)")]
    InvalidProjectType(String),

    #[error("project name sanitizes to nothing: '{0}'")]
    EmptyName(String),

    #[error("project directory already exists: {0}")]
    PathExists(PathBuf),

    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("metadata error in {dir}: {message}")]
    Metadata { dir: PathBuf, message: String },

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ProjectError>;
