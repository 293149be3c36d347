//! clipbench
//!
//! Wires the harness crates into a runnable program: configuration,
//! tracing, dependency wiring and an interactive shell.

pub mod bootstrap;
pub mod cli;
pub mod shell;

pub use bootstrap::{wire_harness, Harness, ResolvedSettings};
pub use cli::Cli;
