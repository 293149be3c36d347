//! # cb-app
//!
//! Application layer of clipbench: the copy coordinator, the paste flow, the
//! eligibility refresh on cross-context notifications, and the dispatch loop
//! that serializes them per context.

pub mod deps;
pub mod log;
pub mod runtime;
pub mod state;
pub mod usecases;

pub use deps::{HarnessDeps, HarnessSettings};
pub use log::HarnessLog;
pub use runtime::{HarnessCommand, HarnessHandle, HarnessRuntime};
pub use state::{HarnessState, StatusReport};
