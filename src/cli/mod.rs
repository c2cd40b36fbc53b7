// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for rendering dataset labels.
//!
//! This module contains the command-line interface logic, including argument parsing
//! and the `visualize` and `datasets` command implementations.

// Modules
/// CLI arguments.
pub mod args;

/// Registry listing.
pub mod datasets;

/// Console output.
pub mod logging;

/// Visualization command.
pub mod visualize;
