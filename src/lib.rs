//! buildorder - Build order for interdependent Maven repositories
//!
//! This library computes in which order a set of repositories must be built
//! so that every internal artifact is produced before it is consumed.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (parsing, extraction, scheduling)
//! - [`infra`] - Infrastructure layer (git, Maven, filesystem)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
