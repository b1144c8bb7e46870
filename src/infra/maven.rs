//! Maven dependency-tree dumps
//!
//! Runs `maven-dependency-plugin:tree` inside a repository and collects the
//! per-module output files into one tree text.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::core::ingest::TreeDumper;
use crate::infra::filesystem;

/// Maven invocation errors
#[derive(Error, Debug)]
pub enum MavenError {
    /// `mvn` is not on PATH
    #[error("Maven executable '{program}' not found on PATH")]
    NotFound { program: String },

    /// The process could not be started
    #[error("Failed to run '{command}': {error}")]
    Spawn { command: String, error: String },

    /// The process exited unsuccessfully
    #[error("'{command}' failed with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Output files could not be read or cleaned up
    #[error("Failed to collect dependency tree output: {0}")]
    Output(#[from] crate::error::FilesystemError),
}

/// Dumps dependency trees with the Maven dependency plugin
#[derive(Debug, Clone)]
pub struct MavenTreeDumper {
    program: String,
    plugin_version: String,
    output_file: String,
}

impl MavenTreeDumper {
    /// Create a dumper using `mvn` from PATH
    pub fn new(plugin_version: impl Into<String>, output_file: impl Into<String>) -> Self {
        Self {
            program: "mvn".to_string(),
            plugin_version: plugin_version.into(),
            output_file: output_file.into(),
        }
    }

    /// Use a different Maven executable (e.g., `mvnw`)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Goal passed to Maven
    pub fn goal(&self) -> String {
        format!(
            "org.apache.maven.plugins:maven-dependency-plugin:{}:tree",
            self.plugin_version
        )
    }

    /// Output file argument passed to Maven
    pub fn output_arg(&self) -> String {
        format!("-DoutputFile={}", self.output_file)
    }

    /// All tree output files under `repo_path`, sorted by path
    pub fn output_files(&self, repo_path: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(repo_path)
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git")
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file() && e.file_name() == self.output_file.as_str())
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }

    /// Concatenate the tree output files under `repo_path`
    pub fn collect_output(&self, repo_path: &Path) -> Result<String, MavenError> {
        let mut tree = String::new();
        for file in self.output_files(repo_path) {
            let content = filesystem::read_file(&file)?;
            tree.push_str(&content);
            if !content.is_empty() && !content.ends_with('\n') {
                tree.push('\n');
            }
        }
        Ok(tree)
    }

    /// Run Maven and return the collected tree text
    pub fn run(&self, repo_path: &Path) -> Result<String, MavenError> {
        let program = which::which(&self.program).map_err(|_| MavenError::NotFound {
            program: self.program.clone(),
        })?;

        for stale in self.output_files(repo_path) {
            filesystem::remove_file_if_exists(&stale)?;
        }

        let command = format!("{} {} {}", self.program, self.goal(), self.output_arg());
        tracing::info!("Running command \"{command}\" in {}", repo_path.display());

        let output = Command::new(program)
            .arg(self.goal())
            .arg(self.output_arg())
            .current_dir(repo_path)
            .output()
            .map_err(|e| MavenError::Spawn {
                command: command.clone(),
                error: e.to_string(),
            })?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("Maven output for {}:\n{stdout}", repo_path.display());
            return Err(MavenError::Failed {
                command,
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        self.collect_output(repo_path)
    }
}

impl TreeDumper for MavenTreeDumper {
    fn dump(&self, repo_path: &Path) -> Result<String, String> {
        self.run(repo_path).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_goal_and_output_arg() {
        let dumper = MavenTreeDumper::new("3.0.2", "dependency_tree");
        assert_eq!(
            dumper.goal(),
            "org.apache.maven.plugins:maven-dependency-plugin:3.0.2:tree"
        );
        assert_eq!(dumper.output_arg(), "-DoutputFile=dependency_tree");
    }

    #[test]
    fn test_collect_output_concatenates_modules_in_path_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("module-b")).unwrap();
        std::fs::create_dir_all(root.join("module-a")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join("dependency_tree"), "com.dell.cpsd:parent:pom:1.0").unwrap();
        std::fs::write(root.join("module-b/dependency_tree"), "com.dell.cpsd:b:jar:1.0\n").unwrap();
        std::fs::write(root.join("module-a/dependency_tree"), "com.dell.cpsd:a:jar:1.0\n").unwrap();
        std::fs::write(root.join(".git/dependency_tree"), "ignored\n").unwrap();

        let dumper = MavenTreeDumper::new("3.0.2", "dependency_tree");
        let tree = dumper.collect_output(root).unwrap();

        assert_eq!(
            tree,
            "com.dell.cpsd:parent:pom:1.0\ncom.dell.cpsd:a:jar:1.0\ncom.dell.cpsd:b:jar:1.0\n"
        );
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let temp = TempDir::new().unwrap();
        let dumper = MavenTreeDumper::new("3.0.2", "dependency_tree")
            .with_program("definitely-not-a-maven-binary-xyz");

        let err = dumper.run(temp.path()).unwrap_err();
        assert!(matches!(err, MavenError::NotFound { .. }));
        assert!(dumper.dump(temp.path()).is_err());
    }
}
