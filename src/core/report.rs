//! Build-order report
//!
//! Structured result handed to the renderers: the groups, the unresolved
//! residue and the revision/origin of every repository involved.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::record::CachedTreeRecord;
use crate::core::scheduler::{BuildOrder, Schedule};

/// Source metadata of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryMeta {
    /// Revision the dependency tree was generated from
    pub revision: String,
    /// Remote origin URL
    pub origin_url: String,
}

impl From<&CachedTreeRecord> for RepositoryMeta {
    fn from(record: &CachedTreeRecord) -> Self {
        Self {
            revision: record.revision.clone(),
            origin_url: record.origin_url.clone(),
        }
    }
}

/// A repository dropped before scheduling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedRepository {
    /// Repository name
    pub repository: String,
    /// Why it was dropped
    pub reason: String,
}

/// Everything needed to render a build-order report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOrderReport {
    /// Tracked group id
    pub group_id: String,
    /// Build groups, group 0 first
    pub groups: BuildOrder,
    /// Repositories that could not be placed in any group
    pub unresolved: Vec<String>,
    /// Repositories excluded by ingestion or extraction failures
    pub excluded: Vec<ExcludedRepository>,
    /// Metadata of every ingested repository
    pub repositories: BTreeMap<String, RepositoryMeta>,
}

impl BuildOrderReport {
    /// Assemble a report from a schedule and the records it was built from
    pub fn new(
        group_id: &str,
        schedule: Schedule,
        records: &BTreeMap<String, CachedTreeRecord>,
        excluded: Vec<ExcludedRepository>,
    ) -> Self {
        Self {
            group_id: group_id.to_string(),
            groups: schedule.order,
            unresolved: schedule.unresolved,
            excluded,
            repositories: records
                .iter()
                .map(|(name, record)| (name.clone(), RepositoryMeta::from(record)))
                .collect(),
        }
    }

    /// Whether some repositories could not be ordered
    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// Render the report as plain text
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for (index, group) in self.groups.iter().enumerate() {
            out.push_str(&format!(
                "Build group {index} ({} repositories)\n",
                group.len()
            ));
            for name in group {
                match self.repositories.get(name) {
                    Some(meta) if !meta.origin_url.is_empty() => {
                        out.push_str(&format!("  {name}  {}  {}\n", meta.revision, meta.origin_url));
                    }
                    Some(meta) => out.push_str(&format!("  {name}  {}\n", meta.revision)),
                    None => out.push_str(&format!("  {name}\n")),
                }
            }
        }

        if self.has_unresolved() {
            out.push_str(
                "\nUnresolved: these repositories cannot find their dependencies in the artifacts already produced\n",
            );
            for name in &self.unresolved {
                out.push_str(&format!("  {name}\n"));
            }
        }

        if !self.excluded.is_empty() {
            out.push_str("\nExcluded:\n");
            for excluded in &self.excluded {
                out.push_str(&format!("  {}: {}\n", excluded.repository, excluded.reason));
            }
        }

        out
    }
}
