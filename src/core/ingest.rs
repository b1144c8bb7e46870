//! Dependency-tree ingestion
//!
//! Produces a [`CachedTreeRecord`] per repository, regenerating the tree
//! only when the checked-out revision differs from the cached one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::core::record::{CachedTreeRecord, TreeCache};
use crate::error::{IngestError, RecordError};

/// Source-control queries needed for cache validation
pub trait SourceControl: Send + Sync {
    /// Identifier of the checked-out revision
    fn revision(&self, repo_path: &Path) -> Result<String, String>;

    /// URL of the `origin` remote
    fn origin_url(&self, repo_path: &Path) -> Result<String, String>;
}

/// Produces the raw dependency-tree text of a repository
pub trait TreeDumper: Send + Sync {
    /// Dump the dependency tree of the repository at `repo_path`
    fn dump(&self, repo_path: &Path) -> Result<String, String>;
}

/// How a record was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Cached record matched the current revision
    Reused,
    /// Tree was dumped and the cache rewritten
    Regenerated,
}

impl std::fmt::Display for IngestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reused => write!(f, "reused"),
            Self::Regenerated => write!(f, "regenerated"),
        }
    }
}

/// Result of ingesting one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    /// The record now in the cache
    pub record: CachedTreeRecord,
    /// Whether the record was reused or regenerated
    pub outcome: IngestOutcome,
}

/// Per-repository ingestion results, in input order
pub type IngestResults = Vec<(String, Result<Ingested, IngestError>)>;

/// Revision-keyed dependency-tree ingester
pub struct Ingester {
    cache: TreeCache,
    source_control: Arc<dyn SourceControl>,
    dumper: Arc<dyn TreeDumper>,
}

impl std::fmt::Debug for Ingester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ingester").field("cache", &self.cache).finish_non_exhaustive()
    }
}

impl Ingester {
    /// Create an ingester writing to `cache`
    pub fn new(
        cache: TreeCache,
        source_control: Arc<dyn SourceControl>,
        dumper: Arc<dyn TreeDumper>,
    ) -> Self {
        Self {
            cache,
            source_control,
            dumper,
        }
    }

    /// The cache this ingester reads and writes
    pub fn cache(&self) -> &TreeCache {
        &self.cache
    }

    /// Ingest a single repository
    ///
    /// The dump tool runs only when no cache exists or its revision differs
    /// from the checked-out revision.
    pub fn ingest(&self, repository: &str, repo_path: &Path) -> Result<Ingested, IngestError> {
        let cache_error = |source: RecordError| IngestError::Cache {
            repository: repository.to_string(),
            source,
        };
        let scm_error = |error: String| IngestError::SourceControl {
            repository: repository.to_string(),
            error,
        };

        let cached_revision = self.cache.cached_revision(repository).map_err(cache_error)?;
        if cached_revision.is_none() {
            tracing::info!(
                "No previous {} file exists. A new one will be created.",
                self.cache.path_for(repository).display()
            );
        }

        let revision = self.source_control.revision(repo_path).map_err(scm_error)?;
        let origin_url = self.source_control.origin_url(repo_path).map_err(scm_error)?;

        if cached_revision.as_deref() == Some(revision.as_str()) {
            match self.cache.load(repository) {
                Ok(Some(record)) => {
                    tracing::info!("'{repository}' is unchanged at {revision}, reusing cached tree");
                    return Ok(Ingested {
                        record,
                        outcome: IngestOutcome::Reused,
                    });
                }
                Ok(None) => {}
                Err(RecordError::Truncated { path, missing }) => {
                    tracing::warn!(
                        "Cache file {} is missing its {missing} line, regenerating tree",
                        path.display()
                    );
                }
                Err(e) => return Err(cache_error(e)),
            }
        } else if let Some(old) = &cached_revision {
            tracing::info!("'{repository}' moved from {old} to {revision}, regenerating tree");
        }

        let raw_body = self
            .dumper
            .dump(repo_path)
            .map_err(|error| IngestError::TreeGenerationFailed {
                repository: repository.to_string(),
                error,
            })?;

        let record = CachedTreeRecord {
            repository: repository.to_string(),
            revision,
            origin_url,
            raw_body,
        };
        self.cache.store(&record).map_err(cache_error)?;

        Ok(Ingested {
            record,
            outcome: IngestOutcome::Regenerated,
        })
    }

    /// Load a repository's record from the cache without touching the repository
    pub fn load_cached(&self, repository: &str) -> Result<Ingested, IngestError> {
        let record = self
            .cache
            .load(repository)
            .map_err(|source| IngestError::Cache {
                repository: repository.to_string(),
                source,
            })?
            .ok_or_else(|| IngestError::MissingCache {
                repository: repository.to_string(),
                path: self.cache.path_for(repository),
            })?;

        Ok(Ingested {
            record,
            outcome: IngestOutcome::Reused,
        })
    }

    /// Ingest many repositories with at most `max_parallel` at a time
    ///
    /// Each repository is handled by exactly one worker. Failures are
    /// reported per repository and never abort the others.
    pub async fn ingest_all(
        self: &Arc<Self>,
        repositories: Vec<(String, PathBuf)>,
        max_parallel: usize,
        on_done: impl Fn(&str) + Send + Sync + 'static,
    ) -> IngestResults {
        let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
        let on_done = Arc::new(on_done);

        let handles: Vec<_> = repositories
            .into_iter()
            .map(|(name, path)| {
                let sem = semaphore.clone();
                let ingester = Arc::clone(self);
                let on_done = on_done.clone();
                let task_name = name.clone();

                let handle = tokio::spawn(async move {
                    let _permit = sem.acquire_owned().await.expect("semaphore is never closed");
                    let worker_name = task_name.clone();
                    let joined =
                        tokio::task::spawn_blocking(move || ingester.ingest(&worker_name, &path))
                            .await;
                    on_done(&task_name);
                    match joined {
                        Ok(result) => result,
                        Err(e) => Err(IngestError::Worker {
                            repository: task_name,
                            error: e.to_string(),
                        }),
                    }
                });
                (name, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(IngestError::Worker {
                    repository: name.clone(),
                    error: e.to_string(),
                }),
            };
            if let Err(e) = &result {
                tracing::warn!("Excluding '{name}' from this run: {e}");
            }
            results.push((name, result));
        }

        results
    }
}
