use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use cb_core::ports::{ContentError, ContentProviderPort};
use cb_core::{FormatTag, PayloadSet};

/// Phase 2 of a copy: fetches the real content of each requested format.
///
/// Cloneable so it can run detached from the dispatch loop. The first failing
/// format aborts the whole resolution; nothing partial is returned.
#[derive(Clone)]
pub struct CopyContentResolver {
    content: Arc<dyn ContentProviderPort>,
    delay: Duration,
}

impl CopyContentResolver {
    pub fn new(content: Arc<dyn ContentProviderPort>, delay: Duration) -> Self {
        Self { content, delay }
    }

    #[tracing::instrument(name = "usecase.copy.resolve", skip_all, fields(formats = formats.len()))]
    pub async fn resolve(&self, formats: &[FormatTag]) -> Result<PayloadSet, ContentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut payloads = PayloadSet::new();
        for tag in formats {
            let content = self.content.resolve(tag).await?;
            debug!(format = %tag, bytes = content.size_bytes(), "Resolved copy format");
            payloads.insert(tag.clone(), content);
        }
        Ok(payloads)
    }
}
