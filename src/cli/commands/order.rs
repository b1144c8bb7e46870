//! CLI implementation for `buildorder order`
//!
//! Ingests every repository under the root, extracts its dependencies and
//! prints the build groups.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::commands::ingest_repositories;
use crate::cli::output::{status, OutputConfig};
use crate::config::defaults::EXIT_UNRESOLVED;
use crate::core::discover::discover_repositories;
use crate::core::extractor::DependencyExtractor;
use crate::core::pipeline::{build_report, dependencies_json, extract_all};
use crate::core::scheduler::ScheduleOptions;
use crate::core::settings::Settings;
use crate::infra::filesystem::write_file_atomic;

/// Execute the order command
pub async fn execute(
    settings: &Settings,
    output: OutputConfig,
    offline: bool,
    data_out: Option<&Path>,
) -> Result<i32> {
    let repositories = discover_repositories(&settings.root)
        .with_context(|| format!("Failed to scan {}", settings.root.display()))?;

    if repositories.is_empty() {
        anyhow::bail!(
            "No repositories found under {}. Each repository must contain a pom.xml.",
            settings.root.display()
        );
    }
    tracing::info!(
        "Found {} repositories under {}",
        repositories.len(),
        settings.root.display()
    );

    let results = ingest_repositories(settings, repositories, offline, output).await;

    let extractor = DependencyExtractor::new(&settings.group_id);
    let extracted = extract_all(results, &extractor);

    if let Some(path) = data_out {
        let json = dependencies_json(&extracted.dependencies)?;
        write_file_atomic(path, &json)?;
        if output.show_progress() {
            println!("{} Dependency data written to {}", status::SUCCESS, path.display());
        }
    }

    let options = ScheduleOptions {
        match_mode: settings.match_mode,
    };
    let report = build_report(&extracted, &extractor, options);

    if output.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize build order report")?;
        println!("{json}");
    } else {
        print!("{}", report.to_text());
    }

    if report.has_unresolved() {
        Ok(EXIT_UNRESOLVED)
    } else {
        Ok(0)
    }
}
