//! Build-order scheduling
//!
//! Partitions repositories into build groups level by level: a repository
//! joins group `k` once every internal artifact it needs has been produced
//! by groups `0..k`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::extractor::RepositoryDependencyInfo;

/// Repositories with no internal dependency among each other
pub type BuildGroup = Vec<String>;

/// Build groups, group 0 first
pub type BuildOrder = Vec<BuildGroup>;

/// How produced artifacts are matched against dependencies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Match on artifact name only
    #[default]
    Name,
    /// Match on `group:name`
    Qualified,
}

impl MatchMode {
    /// Select the mode from the `--strict` flag
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Qualified
        } else {
            Self::Name
        }
    }

    fn key(self, group: &str, name: &str) -> String {
        match self {
            Self::Name => name.to_string(),
            Self::Qualified => format!("{group}:{name}"),
        }
    }
}

/// Scheduler options
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleOptions {
    /// Artifact matching granularity
    pub match_mode: MatchMode,
}

/// Result of a scheduling run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Build groups that could be formed
    pub order: BuildOrder,
    /// Repositories left over when no further group could be formed
    pub unresolved: Vec<String>,
}

impl Schedule {
    /// Whether every repository was placed in a group
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Number of repositories placed in a group
    pub fn scheduled_count(&self) -> usize {
        self.order.iter().map(Vec::len).sum()
    }

    /// Index of the group containing `repository`
    pub fn group_of(&self, repository: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|group| group.iter().any(|r| r == repository))
    }
}

/// Level-based build-order scheduler
#[derive(Debug, Default)]
pub struct Scheduler {
    options: ScheduleOptions,
}

impl Scheduler {
    /// Create a scheduler with the given options
    pub fn new(options: ScheduleOptions) -> Self {
        Self { options }
    }

    /// Compute build groups for all repositories
    ///
    /// Each round evaluates every pending repository against the set of
    /// artifacts produced by earlier rounds only, so repositories accepted in
    /// the same round never satisfy each other. Stops when nothing is pending
    /// or a round accepts nothing; in the latter case the pending
    /// repositories are reported as unresolved and left out of every group.
    pub fn schedule(&self, repositories: &BTreeMap<String, RepositoryDependencyInfo>) -> Schedule {
        let mode = self.options.match_mode;
        let mut pending: BTreeSet<&str> = repositories.keys().map(String::as_str).collect();
        let mut produced: BTreeSet<String> = BTreeSet::new();
        let mut order = BuildOrder::new();

        while !pending.is_empty() {
            tracing::debug!("Round {}: produced artifacts = {:?}", order.len(), produced);

            let accepted: Vec<&str> = pending
                .iter()
                .copied()
                .filter(|name| {
                    let info = &repositories[*name];
                    let missing = info
                        .internal_dependencies_unversioned
                        .values()
                        .find(|dep| !produced.contains(&mode.key(&dep.group, &dep.name)));
                    if let Some(dep) = missing {
                        tracing::debug!(
                            "Skipping '{}' this round: '{}' not produced yet",
                            name,
                            dep.name
                        );
                        return false;
                    }
                    true
                })
                .collect();

            if accepted.is_empty() {
                break;
            }

            for name in &accepted {
                let info = &repositories[*name];
                produced.extend(
                    info.own_artifacts
                        .iter()
                        .map(|a| mode.key(&a.group, &a.name)),
                );
                pending.remove(name);
            }

            tracing::info!(
                "Build group {} has {} repositories: {:?}",
                order.len(),
                accepted.len(),
                accepted
            );
            order.push(accepted.into_iter().map(str::to_string).collect());
        }

        let unresolved: Vec<String> = pending.into_iter().map(str::to_string).collect();
        if !unresolved.is_empty() {
            tracing::warn!(
                "Halting: {} repositories cannot find their dependencies in the artifacts already produced",
                unresolved.len()
            );
            for name in &unresolved {
                tracing::warn!("Unresolved repository: {name}");
            }
        }

        Schedule { order, unresolved }
    }
}
