//! Configuration constants
//!
//! Built-in defaults used when neither the command line, the environment
//! nor a settings file provide a value.

pub mod defaults;
