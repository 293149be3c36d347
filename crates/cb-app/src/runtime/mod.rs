//! Per-context dispatch loop.
//!
//! Commands, mirror notifications and copy completions all arrive as messages;
//! each is handled to completion before the next one is taken.

mod commands;
mod handle;
mod harness_runtime;

pub use commands::{HarnessCommand, HarnessEvent};
pub use handle::HarnessHandle;
pub use harness_runtime::HarnessRuntime;
