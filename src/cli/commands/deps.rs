//! CLI implementation for `buildorder deps`
//!
//! Prints the extracted dependency information of a single repository.

use anyhow::{Context, Result};

use crate::cli::commands::build_ingester;
use crate::cli::output::{format_dependency_info, OutputConfig};
use crate::core::discover::find_repository;
use crate::core::extractor::DependencyExtractor;
use crate::core::settings::Settings;
use crate::error::BuildOrderError;

/// Execute the deps command
pub async fn execute(
    settings: &Settings,
    output: OutputConfig,
    repository: &str,
    offline: bool,
) -> Result<i32> {
    let ingester = build_ingester(settings);

    let ingested = if offline {
        ingester.load_cached(repository)?
    } else {
        let repo = find_repository(&settings.root, repository).ok_or_else(|| {
            BuildOrderError::RepositoryNotFound {
                name: repository.to_string(),
                root: settings.root.clone(),
            }
        })?;
        let name = repo.name.clone();
        tokio::task::spawn_blocking(move || ingester.ingest(&name, &repo.path))
            .await
            .context("Ingestion worker failed")??
    };

    let extractor = DependencyExtractor::new(&settings.group_id);
    let info = extractor
        .extract(&ingested.record.raw_body)
        .map_err(|source| BuildOrderError::Extract {
            repository: repository.to_string(),
            source,
        })?;

    if output.json {
        let json = serde_json::to_string_pretty(&info)
            .with_context(|| format!("Failed to serialize dependencies of '{repository}'"))?;
        println!("{json}");
    } else {
        if !output.quiet {
            println!(
                "Revision {} ({})",
                ingested.record.revision, ingested.record.origin_url
            );
        }
        print!("{}", format_dependency_info(repository, &info));
    }

    Ok(0)
}
