use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use cb_core::ports::{AsyncClipboardPort, CaptureSignalPort, PermissionQueryPort};
use cb_core::FormatTag;

use super::{CaptureBus, SimulatedAsyncClipboard, StaticPermissions};
use crate::ports::SystemBufferPort;

/// Behaviour switches of the simulated host.
#[derive(Debug, Clone)]
pub struct PlatformSettings {
    /// Whether programmatic capture requests are honoured.
    pub honor_capture_requests: bool,
    /// Whether the async clipboard capability exists at all.
    pub async_clipboard_available: bool,
    /// Tags that throw when set inside a copy event.
    pub rejected_formats: BTreeSet<FormatTag>,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            honor_capture_requests: true,
            async_clipboard_available: true,
            rejected_formats: BTreeSet::new(),
        }
    }
}

/// Host shared by every context of the harness.
pub struct SimulatedPlatform {
    buffer: Arc<dyn SystemBufferPort>,
    settings: PlatformSettings,
}

/// Platform capabilities as seen from one context.
#[derive(Clone)]
pub struct ContextPlatform {
    pub capture: Arc<dyn CaptureSignalPort>,
    pub async_clipboard: Option<Arc<dyn AsyncClipboardPort>>,
    pub permissions: Arc<dyn PermissionQueryPort>,
}

impl SimulatedPlatform {
    pub fn new(buffer: Arc<dyn SystemBufferPort>, settings: PlatformSettings) -> Self {
        info!(
            backend = buffer.backend(),
            honor_capture_requests = settings.honor_capture_requests,
            async_clipboard_available = settings.async_clipboard_available,
            "Simulated platform ready"
        );
        Self { buffer, settings }
    }

    pub fn buffer(&self) -> Arc<dyn SystemBufferPort> {
        self.buffer.clone()
    }

    pub fn settings(&self) -> &PlatformSettings {
        &self.settings
    }

    /// Capabilities for a newly opened context.
    pub fn open_context(&self) -> ContextPlatform {
        let capture = Arc::new(CaptureBus::new(
            self.buffer.clone(),
            self.settings.honor_capture_requests,
            self.settings.rejected_formats.clone(),
        ));
        let async_clipboard = self.settings.async_clipboard_available.then(|| {
            Arc::new(SimulatedAsyncClipboard::new(self.buffer.clone())) as Arc<dyn AsyncClipboardPort>
        });
        let permissions = Arc::new(StaticPermissions::for_async_clipboard(
            self.settings.async_clipboard_available,
        ));

        ContextPlatform {
            capture,
            async_clipboard,
            permissions,
        }
    }
}
