//! Cached dependency-tree records
//!
//! A record is stored as `<repository>.<suffix>` with the revision on the
//! first line, the origin URL on the second and the raw tree text after.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::infra::filesystem;

/// Dependency tree of one repository at one revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedTreeRecord {
    /// Repository name
    pub repository: String,
    /// Commit the tree was generated from
    pub revision: String,
    /// Remote origin URL
    pub origin_url: String,
    /// Raw dependency-tree text
    pub raw_body: String,
}

impl CachedTreeRecord {
    /// Serialize to the on-disk format
    pub fn to_text(&self) -> String {
        format!("{}\n{}\n{}", self.revision, self.origin_url, self.raw_body)
    }

    /// Parse the on-disk format
    ///
    /// Returns `None` when the revision or origin URL line is missing.
    pub fn from_text(repository: &str, text: &str) -> Option<Self> {
        let (revision, rest) = text.split_once('\n')?;
        let (origin_url, raw_body) = rest.split_once('\n').unwrap_or((rest, ""));

        Some(Self {
            repository: repository.to_string(),
            revision: revision.trim().to_string(),
            origin_url: origin_url.trim().to_string(),
            raw_body: raw_body.to_string(),
        })
    }
}

/// Location of cache files for a set of repositories
#[derive(Debug, Clone)]
pub struct TreeCache {
    dir: PathBuf,
    suffix: String,
}

impl TreeCache {
    /// Cache rooted at `dir` using files named `<repository>.<suffix>`
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for `repository`
    pub fn path_for(&self, repository: &str) -> PathBuf {
        self.dir.join(format!("{repository}.{}", self.suffix))
    }

    /// Load the cached record for `repository`, if any
    pub fn load(&self, repository: &str) -> Result<Option<CachedTreeRecord>, RecordError> {
        let path = self.path_for(repository);
        let Some(text) = filesystem::read_file_if_exists(&path)? else {
            return Ok(None);
        };

        match CachedTreeRecord::from_text(repository, &text) {
            Some(record) => Ok(Some(record)),
            None => Err(RecordError::Truncated {
                path,
                missing: "origin URL",
            }),
        }
    }

    /// Read only the cached revision for `repository`, if any
    pub fn cached_revision(&self, repository: &str) -> Result<Option<String>, RecordError> {
        let path = self.path_for(repository);
        let text = filesystem::read_file_if_exists(&path)?;
        Ok(text.and_then(|t| t.lines().next().map(|l| l.trim().to_string())))
    }

    /// Persist `record`, atomically replacing any previous file
    pub fn store(&self, record: &CachedTreeRecord) -> Result<(), RecordError> {
        let path = self.path_for(&record.repository);
        filesystem::write_file_atomic(&path, &record.to_text())?;
        Ok(())
    }
}
