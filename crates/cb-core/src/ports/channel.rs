use async_trait::async_trait;

use super::ChannelError;
use crate::clipboard::PayloadSet;

/// Transfer channel: the ephemeral, system-wide buffer copies land in.
///
/// Implementations differ in *how* they reach the platform (inside a capture
/// signal vs. a direct async call); callers never inspect which one they hold.
#[async_trait]
pub trait TransferChannelPort: Send + Sync {
    /// Human readable transport name for logs.
    fn transport(&self) -> &'static str;

    /// Replaces the channel contents. An empty set must reset the channel.
    async fn write(&self, payloads: &PayloadSet) -> Result<(), ChannelError>;

    async fn read(&self) -> Result<PayloadSet, ChannelError>;
}
