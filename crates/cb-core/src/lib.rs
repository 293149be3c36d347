//! # cb-core
//!
//! Core domain models and reconciliation logic for clipbench.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Everything that touches a platform (clipboard buffers, capture signals, storage,
//! content sources, UI) is reached through the traits in [`ports`].

// Public module exports
pub mod clipboard;
pub mod config;
pub mod error;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{
    Classification, CopyMetadata, CopyStatus, FormatPolicy, FormatTag, PayloadContent,
    PayloadSet, Replica, ReplicaKind, StoragePolicy, TriggerKind,
};
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use ids::SessionId;
