//! A single-process stand-in for a browser hosting several same-origin tabs.
//!
//! All contexts share one [`SystemBufferPort`](crate::ports::SystemBufferPort);
//! each context has its own capture signal bus.

mod async_clipboard;
mod capture_bus;
mod permissions;
mod platform;

pub use async_clipboard::SimulatedAsyncClipboard;
pub use capture_bus::CaptureBus;
pub use permissions::StaticPermissions;
pub use platform::{ContextPlatform, PlatformSettings, SimulatedPlatform};
