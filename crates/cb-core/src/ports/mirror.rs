use async_trait::async_trait;
use tokio::sync::mpsc;

use super::MirrorError;

/// Persisted key holding the JSON `{sessionId, copyStatus}` of the last copy.
pub const MIRROR_METADATA_KEY: &str = "CopyMetadata";
/// Persisted key holding the JSON map format tag → content of the last copy.
pub const MIRROR_PAYLOADS_KEY: &str = "CopyPayloads";

/// Change made to a watched key by *another* context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorChange {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Same-origin key/value replica shared by every open context.
#[async_trait]
pub trait MirrorStorePort: Send + Sync {
    async fn put(&self, key: &str, value: String) -> Result<(), MirrorError>;

    async fn get(&self, key: &str) -> Result<Option<String>, MirrorError>;

    async fn remove(&self, key: &str) -> Result<(), MirrorError>;

    /// Notifications for changes made by other contexts. Own writes are never delivered.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<MirrorChange>;
}
