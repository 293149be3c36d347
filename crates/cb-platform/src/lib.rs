//! # cb-platform
//!
//! Platform implementations for clipbench.
//!
//! This crate owns everything that stands in for the host environment: the
//! system clipboard buffer (in memory or the OS clipboard), the one-shot
//! capture signals of copy/paste gestures, the async clipboard capability,
//! permission probes, the two transfer channel adapters and the console UI.

pub mod adapters;
pub mod buffer;
pub mod ports;
pub mod simulated;

pub use adapters::{ConsoleUi, DeferredCaptureAdapter, DirectAdapter};
pub use buffer::{MemoryBuffer, SystemClipboardBuffer};
pub use simulated::{ContextPlatform, PlatformSettings, SimulatedPlatform};
