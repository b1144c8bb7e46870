//! CLI implementation for `buildorder refresh`
//!
//! Brings every repository's cached dependency tree up to date without
//! scheduling anything.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::commands::ingest_repositories;
use crate::cli::output::{status, OutputConfig};
use crate::core::discover::discover_repositories;
use crate::core::settings::Settings;

/// Refresh result of one repository, for `--json`
#[derive(Debug, Serialize)]
struct RefreshEntry {
    repository: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the refresh command
pub async fn execute(settings: &Settings, output: OutputConfig) -> Result<i32> {
    let repositories = discover_repositories(&settings.root)
        .with_context(|| format!("Failed to scan {}", settings.root.display()))?;

    if repositories.is_empty() {
        if !output.quiet {
            println!(
                "{} No repositories found under {}",
                status::INFO,
                settings.root.display()
            );
        }
        return Ok(0);
    }

    let results = ingest_repositories(settings, repositories, false, output).await;

    let entries: Vec<RefreshEntry> = results
        .into_iter()
        .map(|(repository, result)| match result {
            Ok(ingested) => RefreshEntry {
                repository,
                outcome: Some(ingested.outcome.to_string()),
                revision: Some(ingested.record.revision),
                error: None,
            },
            Err(e) => RefreshEntry {
                repository,
                outcome: None,
                revision: None,
                error: Some(e.to_string()),
            },
        })
        .collect();
    let failed = entries.iter().filter(|e| e.error.is_some()).count();

    if output.json {
        let json =
            serde_json::to_string_pretty(&entries).context("Failed to serialize refresh results")?;
        println!("{json}");
    } else {
        for entry in &entries {
            match (&entry.outcome, &entry.revision, &entry.error) {
                (Some(outcome), Some(revision), _) => {
                    if !output.quiet {
                        println!(
                            "{} {}: {outcome} at {revision}",
                            status::SUCCESS,
                            entry.repository
                        );
                    }
                }
                (_, _, Some(error)) => println!("{} {}: {error}", status::ERROR, entry.repository),
                _ => {}
            }
        }
        if failed > 0 {
            println!(
                "{} {failed} of {} repositories failed to refresh",
                status::WARNING,
                entries.len()
            );
        }
    }

    Ok(i32::from(failed > 0))
}
