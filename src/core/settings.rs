//! Settings management
//!
//! Reads the optional `buildorder.toml` settings file and merges it with
//! command-line and environment overrides. Precedence, highest first:
//! command line, environment, settings file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::defaults::{
    APP_NAME, DEFAULT_GROUP_ID, DEFAULT_OUTPUT_FILE, DEFAULT_PLUGIN_VERSION,
    GLOBAL_SETTINGS_FILE_NAME, SETTINGS_FILE_NAME,
};
use crate::core::scheduler::MatchMode;

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read settings file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse settings file '{path}': {error}")]
    ParseError { path: String, error: String },

    /// Explicitly requested settings file does not exist
    #[error("Settings file '{path}' not found")]
    NotFound { path: String },
}

/// Contents of a settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Tracked group settings
    #[serde(default)]
    pub tracking: TrackingSection,

    /// Maven invocation settings
    #[serde(default)]
    pub maven: MavenSection,

    /// Ingestion settings
    #[serde(default)]
    pub ingest: IngestSection,

    /// Scheduling settings
    #[serde(default)]
    pub schedule: ScheduleSection,
}

/// `[tracking]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingSection {
    /// Organization group id
    pub group_id: Option<String>,
}

/// `[maven]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MavenSection {
    /// maven-dependency-plugin version
    pub plugin_version: Option<String>,

    /// Dependency tree output file name
    pub output_file: Option<String>,
}

/// `[ingest]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestSection {
    /// Maximum parallel tree dumps
    pub jobs: Option<usize>,

    /// Directory holding cache files, relative to the root directory
    pub cache_dir: Option<PathBuf>,
}

/// `[schedule]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Match artifacts on `group:name` instead of name only
    pub strict: Option<bool>,
}

impl SettingsFile {
    /// Load settings from a specific path
    ///
    /// A missing file yields default (empty) settings.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Locate and load the settings file
    ///
    /// An explicit path must exist. Otherwise `<root>/buildorder.toml` is
    /// used if present, then the platform config directory.
    pub fn discover(explicit: Option<&Path>, root: &Path) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SettingsError::NotFound {
                    path: path.display().to_string(),
                });
            }
            return Self::load_from_path(path);
        }

        let local = root.join(SETTINGS_FILE_NAME);
        if local.exists() {
            tracing::debug!("Using settings file {}", local.display());
            return Self::load_from_path(&local);
        }

        match global_settings_path() {
            Some(global) if global.exists() => {
                tracing::debug!("Using settings file {}", global.display());
                Self::load_from_path(&global)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Path of the per-user settings file
pub fn global_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(GLOBAL_SETTINGS_FILE_NAME))
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub group_id: Option<String>,
    pub plugin_version: Option<String>,
    pub output_file: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub strict: bool,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root directory holding the repositories
    pub root: PathBuf,
    /// Tracked organization group id
    pub group_id: String,
    /// maven-dependency-plugin version
    pub plugin_version: String,
    /// Dependency tree output file name and cache suffix
    pub output_file: String,
    /// Directory holding cache files
    pub cache_dir: PathBuf,
    /// Maximum parallel tree dumps
    pub jobs: usize,
    /// Artifact matching mode
    pub match_mode: MatchMode,
}

impl Settings {
    /// Built-in defaults for `root`
    pub fn defaults(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            plugin_version: DEFAULT_PLUGIN_VERSION.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            cache_dir: root.to_path_buf(),
            jobs: num_cpus::get(),
            match_mode: MatchMode::Name,
        }
    }

    /// Merge overrides over a settings file over the defaults
    pub fn resolve(root: &Path, file: SettingsFile, overrides: SettingsOverrides) -> Self {
        let defaults = Self::defaults(root);

        let cache_dir = overrides
            .cache_dir
            .or(file.ingest.cache_dir)
            .map_or(defaults.cache_dir, |dir| root.join(dir));

        let strict = overrides.strict || file.schedule.strict.unwrap_or(false);

        Self {
            root: defaults.root,
            group_id: overrides
                .group_id
                .or(file.tracking.group_id)
                .unwrap_or(defaults.group_id),
            plugin_version: overrides
                .plugin_version
                .or(file.maven.plugin_version)
                .unwrap_or(defaults.plugin_version),
            output_file: overrides
                .output_file
                .or(file.maven.output_file)
                .unwrap_or(defaults.output_file),
            cache_dir,
            jobs: overrides
                .jobs
                .or(file.ingest.jobs)
                .unwrap_or(defaults.jobs)
                .max(1),
            match_mode: MatchMode::from_strict(strict),
        }
    }

    /// Discover the settings file and resolve the effective settings
    pub fn load(
        root: &Path,
        explicit_file: Option<&Path>,
        overrides: SettingsOverrides,
    ) -> Result<Self, SettingsError> {
        let file = SettingsFile::discover(explicit_file, root)?;
        Ok(Self::resolve(root, file, overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[tracking]
group_id = "org.example"

[maven]
plugin_version = "3.6.0"

[ingest]
jobs = 3
cache_dir = "trees"

[schedule]
strict = true
"#;

    #[test]
    fn test_defaults_without_file() {
        let root = Path::new("/work");
        let settings = Settings::resolve(root, SettingsFile::default(), SettingsOverrides::default());
        assert_eq!(settings.group_id, "com.dell.cpsd");
        assert_eq!(settings.plugin_version, "3.0.2");
        assert_eq!(settings.output_file, "dependency_tree");
        assert_eq!(settings.cache_dir, PathBuf::from("/work"));
        assert_eq!(settings.match_mode, MatchMode::Name);
        assert!(settings.jobs >= 1);
    }

    #[test]
    fn test_file_values_apply() {
        let file: SettingsFile = toml::from_str(SAMPLE).unwrap();
        let settings = Settings::resolve(Path::new("/work"), file, SettingsOverrides::default());
        assert_eq!(settings.group_id, "org.example");
        assert_eq!(settings.plugin_version, "3.6.0");
        assert_eq!(settings.output_file, "dependency_tree");
        assert_eq!(settings.jobs, 3);
        assert_eq!(settings.cache_dir, PathBuf::from("/work/trees"));
        assert_eq!(settings.match_mode, MatchMode::Qualified);
    }

    #[test]
    fn test_overrides_beat_file() {
        let file: SettingsFile = toml::from_str(SAMPLE).unwrap();
        let overrides = SettingsOverrides {
            group_id: Some("com.override".to_string()),
            jobs: Some(0),
            cache_dir: Some(PathBuf::from("/abs/cache")),
            ..Default::default()
        };
        let settings = Settings::resolve(Path::new("/work"), file, overrides);
        assert_eq!(settings.group_id, "com.override");
        assert_eq!(settings.jobs, 1, "jobs is clamped to at least one");
        assert_eq!(settings.cache_dir, PathBuf::from("/abs/cache"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result: Result<SettingsFile, _> = toml::from_str("[tracking]\ngroup = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_local_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("buildorder.toml"), SAMPLE).unwrap();

        let file = SettingsFile::discover(None, temp.path()).unwrap();
        assert_eq!(file.tracking.group_id.as_deref(), Some("org.example"));
    }

    #[test]
    fn test_discover_explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(matches!(
            SettingsFile::discover(Some(&missing), temp.path()),
            Err(SettingsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("buildorder.toml");
        std::fs::write(&path, "[tracking\n").unwrap();
        assert!(matches!(
            SettingsFile::load_from_path(&path),
            Err(SettingsError::ParseError { .. })
        ));
    }
}
