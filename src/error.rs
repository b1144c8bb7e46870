//! Error types for buildorder
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Coordinate parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    /// Line does not split into a usable `group:name:type:version[:phase]`
    #[error("Malformed coordinate '{line}': expected 4 to 6 colon-delimited fields, found {fields}")]
    MalformedCoordinate { line: String, fields: usize },

    /// One of the identity fields is empty
    #[error("Malformed coordinate '{line}': field '{field}' is empty")]
    EmptyField { line: String, field: &'static str },
}

/// Dependency extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A line of the tree text could not be parsed
    #[error("Line {line_number}: {source}")]
    Coordinate {
        line_number: usize,
        #[source]
        source: CoordinateError,
    },
}

/// Cache record errors
#[derive(Error, Debug)]
pub enum RecordError {
    /// The cache file lacks the revision or origin URL header line
    #[error("Cache file '{path}' is truncated: missing {missing} line")]
    Truncated { path: PathBuf, missing: &'static str },

    /// The cache file could not be read or written
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Dependency-tree ingestion errors
#[derive(Error, Debug)]
pub enum IngestError {
    /// The external dependency-tree dump tool failed
    #[error("Failed to generate dependency tree for '{repository}': {error}")]
    TreeGenerationFailed { repository: String, error: String },

    /// Revision or origin URL could not be determined
    #[error("Failed to query source control for '{repository}': {error}")]
    SourceControl { repository: String, error: String },

    /// No cache file exists and ingestion ran offline
    #[error("No cached dependency tree for '{repository}' at '{path}'")]
    MissingCache { repository: String, path: PathBuf },

    /// Cache read/write failure
    #[error("Cache error for '{repository}': {source}")]
    Cache {
        repository: String,
        #[source]
        source: RecordError,
    },

    /// The worker running the ingestion panicked or was cancelled
    #[error("Ingestion worker for '{repository}' failed: {error}")]
    Worker { repository: String, error: String },
}

impl IngestError {
    /// Name of the repository this error belongs to
    pub fn repository(&self) -> &str {
        match self {
            Self::TreeGenerationFailed { repository, .. }
            | Self::SourceControl { repository, .. }
            | Self::MissingCache { repository, .. }
            | Self::Cache { repository, .. }
            | Self::Worker { repository, .. } => repository,
        }
    }
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to rename a temporary file into place
    #[error("Failed to rename '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to list a directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },
}

/// Top-level buildorder error type
#[derive(Error, Debug)]
pub enum BuildOrderError {
    /// Settings error
    #[error("Settings error: {0}")]
    Settings(#[from] crate::core::settings::SettingsError),

    /// Extraction error for one repository
    #[error("Failed to extract dependencies of '{repository}': {source}")]
    Extract {
        repository: String,
        #[source]
        source: ExtractError,
    },

    /// Ingestion error
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    /// Cache record error
    #[error("Cache record error: {0}")]
    Record(#[from] RecordError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Repository not found under the root directory
    #[error("Repository '{name}' not found under '{root}'")]
    RepositoryNotFound { name: String, root: PathBuf },

    /// JSON serialization error
    #[error("Failed to serialize {what}: {error}")]
    Serialize { what: &'static str, error: String },
}
