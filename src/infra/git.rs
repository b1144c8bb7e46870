//! Git operations
//!
//! Reads the checked-out revision and origin URL of a working tree using the
//! gix crate.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::ingest::SourceControl;

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Path is not a git repository
    #[error("Invalid repository at '{path}': {error}")]
    InvalidRepository { path: PathBuf, error: String },

    /// HEAD could not be resolved to a commit
    #[error("Failed to resolve HEAD in '{path}': {error}")]
    HeadUnresolved { path: PathBuf, error: String },

    /// No `origin` remote URL is configured
    #[error("No remote.origin.url configured in '{path}'")]
    NoOrigin { path: PathBuf },
}

/// Git-backed [`SourceControl`]
#[derive(Debug, Default, Clone, Copy)]
pub struct GitSourceControl;

impl GitSourceControl {
    /// Create a new git source-control handler
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<gix::Repository, GitError> {
        gix::open(path).map_err(|e| GitError::InvalidRepository {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Full hex id of the commit HEAD points to
    pub fn head_revision(&self, path: &Path) -> Result<String, GitError> {
        let repo = Self::open(path)?;
        let id = repo.head_id().map_err(|e| GitError::HeadUnresolved {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Ok(id.to_hex().to_string())
    }

    /// Value of `remote.origin.url`
    pub fn remote_origin_url(&self, path: &Path) -> Result<String, GitError> {
        let repo = Self::open(path)?;
        let url = repo
            .config_snapshot()
            .string("remote.origin.url")
            .map(|value| value.to_string())
            .ok_or_else(|| GitError::NoOrigin {
                path: path.to_path_buf(),
            })?;
        Ok(url.trim().to_string())
    }
}

impl SourceControl for GitSourceControl {
    fn revision(&self, repo_path: &Path) -> Result<String, String> {
        self.head_revision(repo_path).map_err(|e| e.to_string())
    }

    fn origin_url(&self, repo_path: &Path) -> Result<String, String> {
        self.remote_origin_url(repo_path).map_err(|e| e.to_string())
    }
}
