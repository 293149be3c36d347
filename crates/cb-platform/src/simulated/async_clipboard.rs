use std::sync::Arc;

use async_trait::async_trait;

use cb_core::ports::{AsyncClipboardPort, ChannelError};
use cb_core::PayloadSet;

use crate::ports::SystemBufferPort;

/// Async clipboard capability backed by the shared buffer. No capture signal needed.
pub struct SimulatedAsyncClipboard {
    buffer: Arc<dyn SystemBufferPort>,
}

impl SimulatedAsyncClipboard {
    pub fn new(buffer: Arc<dyn SystemBufferPort>) -> Self {
        Self { buffer }
    }
}

#[async_trait]
impl AsyncClipboardPort for SimulatedAsyncClipboard {
    async fn write(&self, payloads: PayloadSet) -> Result<(), ChannelError> {
        let buffer = self.buffer.clone();
        tokio::task::spawn_blocking(move || buffer.write(&payloads))
            .await
            .map_err(|e| ChannelError::Backend(format!("clipboard write task failed: {e}")))?
            .map_err(|e| ChannelError::Backend(format!("{e:#}")))
    }

    async fn read(&self) -> Result<PayloadSet, ChannelError> {
        let buffer = self.buffer.clone();
        tokio::task::spawn_blocking(move || buffer.read())
            .await
            .map_err(|e| ChannelError::Backend(format!("clipboard read task failed: {e}")))?
            .map_err(|e| ChannelError::Backend(format!("{e:#}")))
    }
}
