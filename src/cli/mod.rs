//! CLI module
//!
//! Command-line interface: parses flags, builds the configs, runs the
//! listing and writes the CSV file.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{RunSummary, Runner, EXIT_INCOMPLETE};
