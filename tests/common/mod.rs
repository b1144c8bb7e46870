//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test workspace context
///
/// Creates a temporary root directory holding repositories and their
/// cached dependency trees.
pub struct TestWorkspace {
    /// Temporary root directory
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a new workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the workspace
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Create a repository directory containing a pom.xml
    pub fn create_repository(&self, name: &str) {
        self.create_file(&format!("{name}/pom.xml"), SAMPLE_POM);
    }

    /// Create a repository together with its cached dependency tree
    pub fn create_cached_repository(&self, name: &str, revision: &str, tree: &str) {
        self.create_repository(name);
        self.create_file(
            &format!("{name}.dependency_tree"),
            &format!("{revision}\nhttps://git.example.com/{name}.git\n{tree}"),
        );
    }

    /// Run buildorder with `--root` pointing at this workspace
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_buildorder"));
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("BUILDORDER_GROUP_ID")
            .env_remove("BUILDORDER_PLUGIN_VERSION")
            .env_remove("BUILDORDER_OUTPUT_FILE")
            .env_remove("BUILDORDER_JOBS")
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(self.path());
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute buildorder")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal pom.xml marking a directory as a repository
pub const SAMPLE_POM: &str = r#"<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.dell.cpsd</groupId>
  <artifactId>sample</artifactId>
  <version>1.0.0</version>
</project>
"#;

/// Tree of a repository with no internal dependencies
#[allow(dead_code)]
pub const COMMON_TREE: &str = "\
com.dell.cpsd:common-client:jar:1.0.0
+- com.fasterxml.jackson.core:jackson-databind:jar:2.9.0:compile
\\- junit:junit:jar:4.12:test
";

/// Tree of a repository depending on `common-client`
#[allow(dead_code)]
pub const SERVICE_TREE: &str = "\
com.dell.cpsd:service-api:jar:2.0.0
+- com.dell.cpsd:common-client:jar:1.0.0:compile
|  \\- com.fasterxml.jackson.core:jackson-databind:jar:2.9.0:compile
\\- org.slf4j:slf4j-api:jar:1.7.25:compile
";

/// Tree of a repository depending on an artifact nobody produces
#[allow(dead_code)]
pub const ORPHAN_TREE: &str = "\
com.dell.cpsd:orphan:jar:0.1.0
\\- com.dell.cpsd:missing-lib:jar:9.9.9:compile
";
