use async_trait::async_trait;

use super::ChannelError;
use crate::clipboard::PayloadSet;

/// Deferred/async clipboard capability: writes and reads without a capture signal.
#[async_trait]
pub trait AsyncClipboardPort: Send + Sync {
    async fn write(&self, payloads: PayloadSet) -> Result<(), ChannelError>;

    async fn read(&self) -> Result<PayloadSet, ChannelError>;
}
