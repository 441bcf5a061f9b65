//! Smart City CLI Library
//!
//! Commands and report rendering for the `smartcity` binary. Kept as a
//! library so commands can be driven against an in-memory knowledge base
//! with any reader and writer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Subcommands, goal evaluation and the interactive shell
pub mod commands;
/// Text and JSON reports
pub mod render;

pub use commands::{run, shell, AddArgs, Category, Command, Quantifier};
pub use render::{display_name, Format, Report};
