//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the platform or
//! infrastructure implementations. This follows Hexagonal Architecture
//! principles: the reconciliation logic never touches a clipboard, a storage
//! backend or a UI directly.
//!
//! ## Port Placement Guidelines
//!
//! A port lives here when it represents a capability that is implemented by the
//! platform or infrastructure layer and is needed by more than one use case.

mod async_clipboard;
pub mod capture;
mod channel;
mod clock;
mod content;
pub mod errors;
pub mod mirror;
mod permission;
mod session_identity;
pub mod ui_port;

pub use async_clipboard::AsyncClipboardPort;
pub use capture::{CaptureHandler, CaptureKind, CaptureSignalPort, HandlerId, TransferData};
pub use channel::TransferChannelPort;
pub use clock::ClockPort;
pub use content::ContentProviderPort;
pub use errors::{ChannelError, ContentError, MirrorError};
pub use mirror::{MirrorChange, MirrorStorePort, MIRROR_METADATA_KEY, MIRROR_PAYLOADS_KEY};
pub use permission::{ClipboardCapability, PermissionQueryPort, PermissionState};
pub use session_identity::SessionIdentityPort;
pub use ui_port::{LogLevel, UiPort};
