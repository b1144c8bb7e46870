//! Repository dependency extraction
//!
//! Turns the raw dependency-tree text of one repository into its produced
//! artifacts plus internal and external dependencies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::coordinate::{clean_line, is_decorated, ArtifactCoordinate};
use crate::error::{CoordinateError, ExtractError};

/// Dependency information of a single repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDependencyInfo {
    /// Artifacts the repository itself produces, in tree order
    pub own_artifacts: Vec<ArtifactCoordinate>,
    /// Tracked-group dependencies keyed by `group:name:type:version`
    pub internal_dependencies: BTreeMap<String, ArtifactCoordinate>,
    /// Tracked-group dependencies keyed by `group:name`
    pub internal_dependencies_unversioned: BTreeMap<String, ArtifactCoordinate>,
    /// Third-party dependencies keyed by `group:name:type:version`
    pub external_dependencies: BTreeMap<String, ArtifactCoordinate>,
}

impl RepositoryDependencyInfo {
    /// Names of the artifacts this repository produces
    pub fn own_artifact_names(&self) -> impl Iterator<Item = &str> {
        self.own_artifacts.iter().map(|a| a.name.as_str())
    }

    /// Whether the repository has no internal dependency at all
    pub fn is_standalone(&self) -> bool {
        self.internal_dependencies_unversioned.is_empty()
    }

    /// Drop internal dependencies on artifacts this repository produces
    ///
    /// Multi-module repositories reference their sibling modules; those
    /// references must not look like dependencies on other repositories.
    fn remove_self_references(&mut self) {
        let own: Vec<String> = self.own_artifact_names().map(str::to_string).collect();

        self.internal_dependencies
            .retain(|_, dep| !own.iter().any(|name| *name == dep.name));
        self.internal_dependencies_unversioned
            .retain(|_, dep| !own.iter().any(|name| *name == dep.name));
    }
}

/// Builds [`RepositoryDependencyInfo`] for one tracked group
#[derive(Debug, Clone)]
pub struct DependencyExtractor {
    tracked_group: String,
}

impl DependencyExtractor {
    /// Create an extractor classifying against `tracked_group`
    ///
    /// A coordinate is internal when its group equals `tracked_group` or is a
    /// dotted sub-group of it (`com.dell.cpsd.sub`); `com.dell.cpsdx` is not.
    pub fn new(tracked_group: impl Into<String>) -> Self {
        Self {
            tracked_group: tracked_group.into(),
        }
    }

    /// The tracked group id
    pub fn tracked_group(&self) -> &str {
        &self.tracked_group
    }

    /// Extract dependency information from a raw tree body
    ///
    /// `body` is the tree text without the revision and origin URL header.
    /// Undecorated lines in the tracked group are the roots of each module's
    /// tree and become own artifacts; every other line is a dependency.
    /// Later duplicates of a key replace earlier ones.
    pub fn extract(&self, body: &str) -> Result<RepositoryDependencyInfo, ExtractError> {
        let mut info = RepositoryDependencyInfo::default();

        for (index, raw) in body.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let at_line = |source: CoordinateError| ExtractError::Coordinate {
                line_number: index + 1,
                source,
            };

            let coordinate = if is_decorated(line) {
                ArtifactCoordinate::parse(&clean_line(line)).map_err(at_line)?
            } else {
                let coordinate = ArtifactCoordinate::parse(line).map_err(at_line)?;
                if coordinate.in_group(&self.tracked_group) {
                    tracing::debug!("Own artifact: {coordinate}");
                    info.own_artifacts.push(coordinate);
                    continue;
                }
                coordinate
            };

            if coordinate.in_group(&self.tracked_group) {
                info.internal_dependencies_unversioned
                    .insert(coordinate.unversioned_key(), coordinate.clone());
                info.internal_dependencies
                    .insert(coordinate.versioned_key(), coordinate);
            } else {
                info.external_dependencies
                    .insert(coordinate.versioned_key(), coordinate);
            }
        }

        info.remove_self_references();
        Ok(info)
    }
}
