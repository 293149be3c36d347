use async_trait::async_trait;

use super::ContentError;
use crate::clipboard::{FormatTag, PayloadContent};

/// Source of the real content behind each requested copy format.
#[async_trait]
pub trait ContentProviderPort: Send + Sync {
    async fn resolve(&self, format: &FormatTag) -> Result<PayloadContent, ContentError>;
}
