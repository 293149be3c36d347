use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, warn};

use cb_core::ports::{CaptureKind, CaptureSignalPort, ChannelError, TransferChannelPort};
use cb_core::{FormatTag, PayloadSet};

/// User formats the data-transfer carrier accepts. The reserved metadata tag always travels.
pub const DATA_TRANSFER_FORMATS: [&str; 3] =
    [FormatTag::PLAIN_TEXT, FormatTag::RICH_TEXT, FormatTag::IMAGE];

fn transferable(payloads: &PayloadSet) -> PayloadSet {
    payloads
        .iter()
        .filter(|(tag, _)| {
            let keep = tag.is_reserved() || DATA_TRANSFER_FORMATS.contains(&tag.as_str());
            if !keep {
                warn!(format = %tag, "Format not supported by the data-transfer channel; dropped");
            }
            keep
        })
        .map(|(tag, content)| (tag.clone(), content.clone()))
        .collect()
}

/// Transfer channel reached through one-shot copy/paste capture signals.
///
/// Each write registers a copy handler and asks the platform to fire a copy
/// event; each read does the same with a paste event. If the platform declines
/// the request the handler is withdrawn and the operation fails with
/// [`ChannelError::CaptureRejected`].
pub struct DeferredCaptureAdapter {
    capture: Arc<dyn CaptureSignalPort>,
}

impl DeferredCaptureAdapter {
    pub fn new(capture: Arc<dyn CaptureSignalPort>) -> Self {
        Self { capture }
    }
}

#[async_trait]
impl TransferChannelPort for DeferredCaptureAdapter {
    fn transport(&self) -> &'static str {
        "data_transfer"
    }

    async fn write(&self, payloads: &PayloadSet) -> Result<(), ChannelError> {
        let outgoing = transferable(payloads);
        let fired: Arc<Mutex<Option<Vec<FormatTag>>>> = Arc::new(Mutex::new(None));
        let slot = fired.clone();

        let id = self.capture.register_once(
            CaptureKind::Copy,
            Box::new(move |data| {
                let mut rejected = Vec::new();
                for err in data.set_all(outgoing) {
                    warn!(error = %err, "Skipping format rejected inside copy capture");
                    if let ChannelError::WriteRejected { format, .. } = err {
                        rejected.push(format);
                    }
                }
                if let Ok(mut slot) = slot.lock() {
                    *slot = Some(rejected);
                }
            }),
        );

        if !self.capture.request_capture(CaptureKind::Copy) {
            self.capture.deregister(id);
            return Err(ChannelError::CaptureRejected(CaptureKind::Copy));
        }

        let outcome = fired.lock().ok().and_then(|mut slot| slot.take());
        match outcome {
            Some(rejected) => {
                debug!(
                    formats = payloads.len(),
                    rejected = rejected.len(),
                    "Channel written inside copy capture"
                );
                Ok(())
            }
            None => {
                self.capture.deregister(id);
                Err(ChannelError::CaptureRejected(CaptureKind::Copy))
            }
        }
    }

    async fn read(&self) -> Result<PayloadSet, ChannelError> {
        let received: Arc<Mutex<Option<PayloadSet>>> = Arc::new(Mutex::new(None));
        let slot = received.clone();

        let id = self.capture.register_once(
            CaptureKind::Paste,
            Box::new(move |data| {
                if let Ok(mut slot) = slot.lock() {
                    *slot = Some(data.payloads().clone());
                }
            }),
        );

        if !self.capture.request_capture(CaptureKind::Paste) {
            self.capture.deregister(id);
            return Err(ChannelError::CaptureRejected(CaptureKind::Paste));
        }

        let payloads = received.lock().ok().and_then(|mut slot| slot.take());
        match payloads {
            Some(payloads) => Ok(payloads),
            None => {
                self.capture.deregister(id);
                Err(ChannelError::CaptureRejected(CaptureKind::Paste))
            }
        }
    }
}
