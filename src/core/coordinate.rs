//! Artifact coordinates
//!
//! Parses `group:name:type:version[:phase]` lines and strips the ASCII
//! tree-drawing decoration Maven's dependency tree puts in front of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Characters removed wherever they appear in a tree line
const DECORATION_CHARS: [char; 4] = ['+', '|', '\\', ' '];

/// Identifier of a buildable artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    /// Group id (e.g., "com.dell.cpsd")
    pub group: String,
    /// Artifact name
    pub name: String,
    /// Packaging type (jar, pom, war, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Version string, dashes included
    pub version: String,
    /// Maven scope, if the line carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Classifier of six-field lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl ArtifactCoordinate {
    /// Parse a cleaned coordinate line
    ///
    /// Accepted shapes:
    /// - `group:name:type:version`
    /// - `group:name:type:version:phase`
    /// - `group:name:type:classifier:version:phase`
    pub fn parse(line: &str) -> Result<Self, CoordinateError> {
        let fields: Vec<&str> = line.split(':').collect();

        let (group, name, kind, classifier, version, phase) = match fields.as_slice() {
            [group, name, kind, version] => (*group, *name, *kind, None, *version, None),
            [group, name, kind, version, phase] => {
                (*group, *name, *kind, None, *version, Some(*phase))
            }
            [group, name, kind, classifier, version, phase] => {
                (*group, *name, *kind, Some(*classifier), *version, Some(*phase))
            }
            _ => {
                return Err(CoordinateError::MalformedCoordinate {
                    line: line.to_string(),
                    fields: fields.len(),
                })
            }
        };

        for (field, value) in [
            ("group", group),
            ("name", name),
            ("type", kind),
            ("version", version),
        ] {
            if value.is_empty() {
                return Err(CoordinateError::EmptyField {
                    line: line.to_string(),
                    field,
                });
            }
        }

        Ok(Self {
            group: group.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            version: version.to_string(),
            phase: phase.filter(|p| !p.is_empty()).map(str::to_string),
            classifier: classifier.filter(|c| !c.is_empty()).map(str::to_string),
        })
    }

    /// Versioned identity: `group:name:type:version`
    pub fn versioned_key(&self) -> String {
        format!("{}:{}:{}:{}", self.group, self.name, self.kind, self.version)
    }

    /// Unversioned identity: `group:name`
    pub fn unversioned_key(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }

    /// Whether this coordinate belongs to the tracked group.
    ///
    /// Sub-groups (`<tracked>.<more>`) count as tracked.
    pub fn in_group(&self, tracked_group: &str) -> bool {
        is_tracked_group(&self.group, tracked_group)
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.versioned_key())?;
        if let Some(phase) = &self.phase {
            write!(f, ":{phase}")?;
        }
        Ok(())
    }
}

/// Whether `group` equals `tracked_group` or is a dotted sub-group of it
pub fn is_tracked_group(group: &str, tracked_group: &str) -> bool {
    match group.strip_prefix(tracked_group) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Whether a raw tree line starts with tree-drawing decoration
pub fn is_decorated(line: &str) -> bool {
    line.starts_with(|c: char| DECORATION_CHARS.contains(&c) || c == '-')
}

/// Remove tree-drawing decoration from a raw line
///
/// Every `+`, `|`, `\` and space is dropped. Only the first `-` is dropped;
/// later dashes belong to names and versions such as `1.0.0-SNAPSHOT`.
pub fn clean_line(line: &str) -> String {
    let mut cleaned = String::with_capacity(line.len());
    let mut dash_removed = false;

    for c in line.chars() {
        if DECORATION_CHARS.contains(&c) {
            continue;
        }
        if c == '-' && !dash_removed {
            dash_removed = true;
            continue;
        }
        cleaned.push(c);
    }

    cleaned
}
