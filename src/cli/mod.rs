//! CLI module
//!
//! Command-line interface: resolve the query config from file, flags and
//! environment, then fetch every page while printing progress.

mod commands;
mod runner;

pub use commands::{Cli, RecordsArg};
pub use runner::{summary_lines, Runner};
