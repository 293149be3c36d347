use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, info_span, Instrument};

use cb_core::ports::{AsyncClipboardPort, ChannelError, TransferChannelPort};
use cb_core::PayloadSet;

/// Transfer channel reached through the async clipboard capability.
///
/// When the capability is missing, reads come back empty and writes fail with
/// [`ChannelError::UnsupportedCapability`]; callers log both and carry on.
pub struct DirectAdapter {
    clipboard: Option<Arc<dyn AsyncClipboardPort>>,
}

impl DirectAdapter {
    pub fn new(clipboard: Option<Arc<dyn AsyncClipboardPort>>) -> Self {
        Self { clipboard }
    }
}

#[async_trait]
impl TransferChannelPort for DirectAdapter {
    fn transport(&self) -> &'static str {
        "async_clipboard"
    }

    async fn write(&self, payloads: &PayloadSet) -> Result<(), ChannelError> {
        let Some(clipboard) = &self.clipboard else {
            return Err(ChannelError::UnsupportedCapability(
                "async clipboard write".into(),
            ));
        };
        let span = info_span!("platform.channel.direct.write", formats = payloads.len());
        clipboard.write(payloads.clone()).instrument(span).await
    }

    async fn read(&self) -> Result<PayloadSet, ChannelError> {
        let Some(clipboard) = &self.clipboard else {
            info!("Async clipboard unavailable; channel reads as empty");
            return Ok(PayloadSet::new());
        };
        clipboard
            .read()
            .instrument(info_span!("platform.channel.direct.read"))
            .await
    }
}
