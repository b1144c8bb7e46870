//! Core business logic module
//!
//! Parsing, extraction and scheduling are pure; process and git access
//! sit behind the [`ingest::SourceControl`] and [`ingest::TreeDumper`]
//! traits implemented in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`coordinate`] - Artifact coordinate parsing and line cleaning
//! - [`extractor`] - Per-repository dependency extraction
//! - [`scheduler`] - Level-based build-order scheduling
//! - [`record`] - Cached dependency-tree records
//! - [`ingest`] - Revision-keyed tree ingestion
//! - [`discover`] - Repository discovery
//! - [`pipeline`] - Run orchestration
//! - [`report`] - Build-order report model
//! - [`settings`] - Layered settings

pub mod coordinate;
pub mod discover;
pub mod extractor;
pub mod ingest;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod scheduler;
pub mod settings;
