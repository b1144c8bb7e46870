//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress bars, status
//! messages and errors to the user.

use indicatif::{ProgressBar, ProgressStyle};

use crate::core::extractor::RepositoryDependencyInfo;

/// Output preferences for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress progress and status lines
    pub quiet: bool,
    /// Emit JSON instead of text
    pub json: bool,
}

impl OutputConfig {
    /// Create output preferences from the global flags
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Whether progress bars and status lines should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

/// Initialize the tracing subscriber for the given verbosity
///
/// Logs go to stderr; `RUST_LOG` directives are honoured as well.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Create a progress bar counting repositories
pub fn create_repository_bar(total: u64, output: OutputConfig) -> ProgressBar {
    if !output.show_progress() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} repositories ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Render one repository's dependency information as text
pub fn format_dependency_info(repository: &str, info: &RepositoryDependencyInfo) -> String {
    let mut out = format!("{repository}\n");

    out.push_str("  Artifacts:\n");
    for artifact in &info.own_artifacts {
        out.push_str(&format!("    {artifact}\n"));
    }

    out.push_str("  Internal dependencies:\n");
    if info.internal_dependencies.is_empty() {
        out.push_str("    (none)\n");
    }
    for key in info.internal_dependencies.keys() {
        out.push_str(&format!("    {key}\n"));
    }

    out.push_str(&format!(
        "  External dependencies: {}\n",
        info.external_dependencies.len()
    ));
    out
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::DependencyExtractor;

    #[test]
    fn test_show_progress() {
        assert!(OutputConfig::new(false, false).show_progress());
        assert!(!OutputConfig::new(true, false).show_progress());
        assert!(!OutputConfig::new(false, true).show_progress());
    }

    #[test]
    fn test_format_dependency_info() {
        let info = DependencyExtractor::new("com.dell.cpsd")
            .extract("com.dell.cpsd:svc:jar:1.0\n+- com.dell.cpsd:lib:jar:2.0:compile\n\\- junit:junit:jar:4.12:test\n")
            .unwrap();
        let text = format_dependency_info("svc", &info);
        assert!(text.starts_with("svc\n"));
        assert!(text.contains("    com.dell.cpsd:svc:jar:1.0\n"));
        assert!(text.contains("    com.dell.cpsd:lib:jar:2.0\n"));
        assert!(text.contains("External dependencies: 1"));
    }
}
