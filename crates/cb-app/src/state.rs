//! Consolidated mutable state of one context.
//!
//! Session identity, the metadata of the last local copy and the last observed
//! classification live here and nowhere else. Use cases share it by `Arc`.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use cb_core::clipboard::eligible_formats;
use cb_core::ports::SessionIdentityPort;
use cb_core::{Classification, CopyMetadata, FormatTag, SessionId};

#[derive(Debug, Default)]
struct Inner {
    last_copy: Option<CopyMetadata>,
    last_classification: Option<Classification>,
    copies_in_flight: usize,
}

pub struct HarnessState {
    identity: Arc<dyn SessionIdentityPort>,
    inner: Mutex<Inner>,
}

/// Point-in-time view for the `status` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub session_id: SessionId,
    pub last_copy: Option<CopyMetadata>,
    pub last_classification: Option<Classification>,
    pub eligible: BTreeSet<FormatTag>,
    pub copies_in_flight: usize,
}

impl HarnessState {
    pub fn new(identity: Arc<dyn SessionIdentityPort>) -> Self {
        Self {
            identity,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.identity.current_session_id()
    }

    /// Records a local copy. A local copy is same-session by construction.
    pub async fn record_copy(&self, metadata: CopyMetadata) {
        let mut inner = self.inner.lock().await;
        inner.last_copy = Some(metadata);
        inner.last_classification = Some(Classification::SameSession);
    }

    /// Forgets the last copy. With no metadata left, the origin is unknown again.
    pub async fn clear_copy(&self) {
        let mut inner = self.inner.lock().await;
        inner.last_copy = None;
        inner.last_classification = None;
    }

    pub async fn record_classification(&self, classification: Option<Classification>) {
        self.inner.lock().await.last_classification = classification;
    }

    pub async fn last_copy(&self) -> Option<CopyMetadata> {
        self.inner.lock().await.last_copy.clone()
    }

    pub async fn last_classification(&self) -> Option<Classification> {
        self.inner.lock().await.last_classification
    }

    /// Formats the gate allows for the last classification.
    pub async fn eligible_formats(&self) -> BTreeSet<FormatTag> {
        eligible_formats(self.last_classification().await)
    }

    /// Returns the number of copies now resolving.
    pub async fn copy_started(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.copies_in_flight += 1;
        inner.copies_in_flight
    }

    /// Returns the number of copies still resolving.
    pub async fn copy_finished(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.copies_in_flight = inner.copies_in_flight.saturating_sub(1);
        inner.copies_in_flight
    }

    pub async fn status(&self) -> StatusReport {
        let session_id = self.session_id();
        let inner = self.inner.lock().await;
        StatusReport {
            session_id,
            last_copy: inner.last_copy.clone(),
            last_classification: inner.last_classification,
            eligible: eligible_formats(inner.last_classification),
            copies_in_flight: inner.copies_in_flight,
        }
    }
}
