//! Repository discovery
//!
//! Finds the checked-out repositories directly under a root directory.

use std::path::{Path, PathBuf};

use crate::config::defaults::BUILD_DESCRIPTOR;
use crate::error::FilesystemError;

/// A checked-out repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Directory name, used as the repository name
    pub name: String,
    /// Path of the working tree
    pub path: PathBuf,
}

/// List immediate sub-directories of `root` that contain a build descriptor
///
/// Hidden directories are skipped. The result is sorted by name.
pub fn discover_repositories(root: &Path) -> Result<Vec<Repository>, FilesystemError> {
    let mut repositories = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: root.to_path_buf(),
            error: e.to_string(),
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        if entry.path().join(BUILD_DESCRIPTOR).is_file() {
            repositories.push(Repository {
                name,
                path: entry.path().to_path_buf(),
            });
        } else {
            tracing::debug!("Skipping '{}': no {BUILD_DESCRIPTOR}", entry.path().display());
        }
    }

    Ok(repositories)
}

/// Find a single repository by name under `root`
pub fn find_repository(root: &Path, name: &str) -> Option<Repository> {
    let path = root.join(name);
    path.join(BUILD_DESCRIPTOR).is_file().then(|| Repository {
        name: name.to_string(),
        path,
    })
}
