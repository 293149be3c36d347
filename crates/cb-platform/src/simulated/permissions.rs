use async_trait::async_trait;

use cb_core::ports::{ClipboardCapability, PermissionQueryPort, PermissionState};

/// Fixed answers to permission probes.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissions {
    pub read: PermissionState,
    pub write: PermissionState,
}

impl StaticPermissions {
    /// Granted when the async clipboard exists, NotSupported otherwise.
    pub fn for_async_clipboard(available: bool) -> Self {
        let state = if available {
            PermissionState::Granted
        } else {
            PermissionState::NotSupported
        };
        Self {
            read: state,
            write: state,
        }
    }
}

#[async_trait]
impl PermissionQueryPort for StaticPermissions {
    async fn query(&self, capability: ClipboardCapability) -> PermissionState {
        match capability {
            ClipboardCapability::Read => self.read,
            ClipboardCapability::Write => self.write,
        }
    }
}
