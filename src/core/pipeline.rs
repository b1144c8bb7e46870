//! Run orchestration
//!
//! Connects ingestion results, extraction and scheduling while keeping
//! per-repository failures isolated from the rest of the batch.

use std::collections::BTreeMap;

use crate::core::extractor::{DependencyExtractor, RepositoryDependencyInfo};
use crate::core::ingest::IngestResults;
use crate::core::record::CachedTreeRecord;
use crate::core::report::{BuildOrderReport, ExcludedRepository};
use crate::core::scheduler::{ScheduleOptions, Scheduler};
use crate::error::BuildOrderError;

/// Repositories ready for scheduling
#[derive(Debug, Default)]
pub struct Extracted {
    /// Records of every successfully ingested repository
    pub records: BTreeMap<String, CachedTreeRecord>,
    /// Dependency information of every successfully extracted repository
    pub dependencies: BTreeMap<String, RepositoryDependencyInfo>,
    /// Repositories dropped along the way
    pub excluded: Vec<ExcludedRepository>,
}

/// Extract dependency information from ingestion results
///
/// Failed ingestions and malformed trees exclude only their own repository.
pub fn extract_all(results: IngestResults, extractor: &DependencyExtractor) -> Extracted {
    let mut extracted = Extracted::default();

    for (name, result) in results {
        let record = match result {
            Ok(ingested) => ingested.record,
            Err(e) => {
                extracted.excluded.push(ExcludedRepository {
                    repository: name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match extractor.extract(&record.raw_body) {
            Ok(info) => {
                if info.is_standalone() {
                    tracing::debug!("'{name}' has no internal dependencies");
                }
                extracted.dependencies.insert(name.clone(), info);
            }
            Err(source) => {
                let error = BuildOrderError::Extract {
                    repository: name.clone(),
                    source,
                };
                tracing::warn!("Excluding '{name}' from this run: {error}");
                extracted.excluded.push(ExcludedRepository {
                    repository: name.clone(),
                    reason: error.to_string(),
                });
            }
        }
        extracted.records.insert(name, record);
    }

    extracted
}

/// Schedule extracted repositories and assemble the report
pub fn build_report(
    extracted: &Extracted,
    extractor: &DependencyExtractor,
    options: ScheduleOptions,
) -> BuildOrderReport {
    let schedule = Scheduler::new(options).schedule(&extracted.dependencies);
    let scheduled: BTreeMap<String, CachedTreeRecord> = extracted
        .records
        .iter()
        .filter(|(name, _)| extracted.dependencies.contains_key(*name))
        .map(|(name, record)| (name.clone(), record.clone()))
        .collect();

    BuildOrderReport::new(
        extractor.tracked_group(),
        schedule,
        &scheduled,
        extracted.excluded.clone(),
    )
}

/// Serialize the dependency map as pretty JSON
pub fn dependencies_json(
    dependencies: &BTreeMap<String, RepositoryDependencyInfo>,
) -> Result<String, BuildOrderError> {
    serde_json::to_string_pretty(dependencies).map_err(|e| BuildOrderError::Serialize {
        what: "dependency data",
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::{IngestOutcome, Ingested};
    use crate::error::IngestError;

    fn ingested(name: &str, body: &str) -> (String, Result<Ingested, IngestError>) {
        (
            name.to_string(),
            Ok(Ingested {
                record: CachedTreeRecord {
                    repository: name.to_string(),
                    revision: format!("{name}-rev"),
                    origin_url: format!("https://git.example.com/{name}.git"),
                    raw_body: body.to_string(),
                },
                outcome: IngestOutcome::Reused,
            }),
        )
    }

    #[test]
    fn test_pipeline_isolates_failures() {
        let results = vec![
            ingested("X", "com.dell.cpsd:x:jar:1.0\n"),
            ingested(
                "Y",
                "com.dell.cpsd:y:jar:1.0\n+- com.dell.cpsd:x:jar:1.0:compile\n",
            ),
            ingested(
                "Z",
                "com.dell.cpsd:z:jar:1.0\n+- com.dell.cpsd:missing:jar:1.0:compile\n",
            ),
            ingested("Bad", "com.dell.cpsd:bad:jar:1.0\n+- not-a-coordinate\n"),
            (
                "Gone".to_string(),
                Err(IngestError::TreeGenerationFailed {
                    repository: "Gone".to_string(),
                    error: "mvn exited with status 1".to_string(),
                }),
            ),
        ];

        let extractor = DependencyExtractor::new("com.dell.cpsd");
        let extracted = extract_all(results, &extractor);
        assert_eq!(extracted.dependencies.len(), 3);
        assert_eq!(extracted.excluded.len(), 2);

        let report = build_report(&extracted, &extractor, ScheduleOptions::default());
        assert_eq!(
            report.groups,
            vec![vec!["X".to_string()], vec!["Y".to_string()]]
        );
        assert_eq!(report.unresolved, vec!["Z".to_string()]);
        assert!(report.repositories.contains_key("Z"));
        assert!(!report.repositories.contains_key("Bad"));

        let excluded: Vec<_> = report.excluded.iter().map(|e| e.repository.as_str()).collect();
        assert_eq!(excluded, vec!["Bad", "Gone"]);
    }

    #[test]
    fn test_dependencies_json_is_sorted() {
        let extractor = DependencyExtractor::new("com.dell.cpsd");
        let extracted = extract_all(
            vec![
                ingested("b-repo", "com.dell.cpsd:b:jar:1.0\n"),
                ingested("a-repo", "com.dell.cpsd:a:jar:1.0\n"),
            ],
            &extractor,
        );
        let json = dependencies_json(&extracted.dependencies).unwrap();
        let a = json.find("a-repo").unwrap();
        let b = json.find("b-repo").unwrap();
        assert!(a < b);
        assert!(json.contains("\"own_artifacts\""));
    }
}
