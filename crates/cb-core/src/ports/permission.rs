use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipboardCapability {
    Read,
    Write,
}

impl std::fmt::Display for ClipboardCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardCapability::Read => f.write_str("clipboard-read"),
            ClipboardCapability::Write => f.write_str("clipboard-write"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionState {
    Granted,
    Denied,
    NotSupported,
    Error,
}

/// Best-effort permission probe. Advisory only: nothing in the core is gated on it.
#[async_trait]
pub trait PermissionQueryPort: Send + Sync {
    async fn query(&self, capability: ClipboardCapability) -> PermissionState;
}
