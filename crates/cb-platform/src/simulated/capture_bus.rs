use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, error, warn};

use cb_core::ports::{CaptureHandler, CaptureKind, CaptureSignalPort, HandlerId, TransferData};
use cb_core::FormatTag;

use crate::ports::SystemBufferPort;

/// How many scheduler turns a gesture waits for a handler to show up.
const GESTURE_POLL_TURNS: usize = 32;

struct Pending {
    id: HandlerId,
    kind: CaptureKind,
    handler: CaptureHandler,
}

/// Copy/paste event dispatch of one context.
///
/// Firing a copy event runs every pending copy handler against one writable
/// [`TransferData`] and then replaces the system buffer with what they wrote.
/// Firing a paste event hands the current buffer to every pending paste
/// handler. Handlers are removed before they run.
pub struct CaptureBus {
    buffer: Arc<dyn SystemBufferPort>,
    pending: Mutex<Vec<Pending>>,
    next_id: AtomicU64,
    honor_requests: bool,
    rejected_formats: BTreeSet<FormatTag>,
}

impl CaptureBus {
    pub fn new(
        buffer: Arc<dyn SystemBufferPort>,
        honor_requests: bool,
        rejected_formats: BTreeSet<FormatTag>,
    ) -> Self {
        Self {
            buffer,
            pending: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            honor_requests,
            rejected_formats,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    fn take_handlers(&self, kind: CaptureKind) -> Vec<CaptureHandler> {
        let Ok(mut pending) = self.pending.lock() else {
            warn!("Capture handler list poisoned");
            return Vec::new();
        };
        let (fired, kept): (Vec<_>, Vec<_>) = pending.drain(..).partition(|p| p.kind == kind);
        *pending = kept;
        fired.into_iter().map(|p| p.handler).collect()
    }

    fn has_handler(&self, kind: CaptureKind) -> bool {
        self.pending
            .lock()
            .map(|p| p.iter().any(|h| h.kind == kind))
            .unwrap_or(false)
    }

    /// Fires one `kind` event. Returns whether any handler observed it.
    fn fire(&self, kind: CaptureKind) -> bool {
        if !self.has_handler(kind) {
            return false;
        }

        match kind {
            CaptureKind::Copy => {
                let handlers = self.take_handlers(kind);
                let mut data = TransferData::for_copy(self.rejected_formats.clone());
                for handler in handlers {
                    handler(&mut data);
                }
                if let Err(err) = self.buffer.write(data.payloads()) {
                    error!(error = %err, backend = self.buffer.backend(), "Failed to write copy event data to buffer");
                }
            }
            CaptureKind::Paste => {
                let payloads = match self.buffer.read() {
                    Ok(payloads) => payloads,
                    Err(err) => {
                        warn!(error = %err, backend = self.buffer.backend(), "Buffer unreadable; paste event not dispatched");
                        return false;
                    }
                };
                let handlers = self.take_handlers(kind);
                let data = TransferData::for_paste(payloads);
                for handler in handlers {
                    let mut view = data.clone();
                    handler(&mut view);
                }
            }
        }
        debug!(%kind, "Capture event dispatched");
        true
    }
}

#[async_trait]
impl CaptureSignalPort for CaptureBus {
    fn register_once(&self, kind: CaptureKind, handler: CaptureHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.pending.lock() {
            Ok(mut pending) => pending.push(Pending { id, kind, handler }),
            Err(_) => warn!("Capture handler list poisoned; handler dropped"),
        }
        id
    }

    fn deregister(&self, id: HandlerId) -> bool {
        let Ok(mut pending) = self.pending.lock() else {
            return false;
        };
        let before = pending.len();
        pending.retain(|p| p.id != id);
        pending.len() != before
    }

    fn request_capture(&self, kind: CaptureKind) -> bool {
        if !self.honor_requests {
            debug!(%kind, "Programmatic capture request declined");
            return false;
        }
        self.fire(kind)
    }

    async fn dispatch_gesture(&self, kind: CaptureKind) -> bool {
        for _ in 0..GESTURE_POLL_TURNS {
            if self.fire(kind) {
                return true;
            }
            tokio::task::yield_now().await;
        }
        debug!(%kind, "Gesture fired with no capture handler registered");
        false
    }
}
