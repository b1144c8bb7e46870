//! Infrastructure layer
//!
//! Handles all side effects outside the cache files themselves: git
//! queries, Maven invocations and atomic file replacement.

pub mod filesystem;
pub mod git;
pub mod maven;
