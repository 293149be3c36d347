use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use cb_core::clipboard::{wrap_with_copied_at, ChannelEnvelope, ReplicaCodec};
use cb_core::ports::{
    CaptureKind, CaptureSignalPort, ChannelError, ClockPort, ContentError, MirrorStorePort,
    TransferChannelPort, UiPort, MIRROR_METADATA_KEY, MIRROR_PAYLOADS_KEY,
};
use cb_core::{
    CopyMetadata, FormatTag, HarnessError, PayloadContent, PayloadSet, Replica, SessionId,
    StoragePolicy, TriggerKind,
};

use super::CopyContentResolver;
use crate::deps::{HarnessDeps, HarnessSettings};
use crate::log::HarnessLog;
use crate::state::HarnessState;

pub const EMPTY_SELECTION_MESSAGE: &str = "Select at least one payload to copy";

/// A copy whose placeholder is published and whose content still has to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTicket {
    pub formats: Vec<FormatTag>,
    pub trigger: TriggerKind,
    pub session_id: SessionId,
}

/// How a copy ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyReport {
    /// No format was requested; both replicas were wiped.
    Cleared,
    /// Resolved content published, stamped with `copied_at_ms`.
    Published {
        formats: Vec<FormatTag>,
        copied_at_ms: i64,
    },
    /// Resolution failed; replicas keep the placeholder.
    Failed(ContentError),
}

/// Copy coordinator: two-phase publish of a copy to both replicas.
///
/// Phase 1 ([`begin`](Self::begin)) publishes a placeholder with `started`
/// metadata; phase 2 ([`publish`](Self::publish)) publishes the resolved
/// content with `completed` metadata. Every replica write is best effort: a
/// failure is logged and the sibling writes still happen.
pub struct StartCopy {
    channel: Arc<dyn TransferChannelPort>,
    capture: Arc<dyn CaptureSignalPort>,
    mirror: Arc<dyn MirrorStorePort>,
    clock: Arc<dyn ClockPort>,
    ui: Arc<dyn UiPort>,
    state: Arc<HarnessState>,
    log: HarnessLog,
    resolver: CopyContentResolver,
    storage_policy: StoragePolicy,
    capture_timeout: Duration,
}

impl StartCopy {
    pub fn from_deps(
        deps: &HarnessDeps,
        settings: &HarnessSettings,
        state: Arc<HarnessState>,
    ) -> Self {
        Self {
            channel: deps.channel.clone(),
            capture: deps.capture.clone(),
            mirror: deps.mirror.clone(),
            clock: deps.clock.clone(),
            ui: deps.ui.clone(),
            state,
            log: HarnessLog::new(deps.ui.clone()),
            resolver: CopyContentResolver::new(deps.content.clone(), settings.resolve_delay),
            storage_policy: settings.storage_policy,
            capture_timeout: settings.capture_timeout,
        }
    }

    pub fn resolver(&self) -> CopyContentResolver {
        self.resolver.clone()
    }

    /// Runs all three phases inline. The dispatch loop runs `resolve` detached instead.
    pub async fn execute(&self, formats: &[FormatTag], trigger: TriggerKind) -> CopyReport {
        let Some(ticket) = self.begin(formats, trigger).await else {
            return CopyReport::Cleared;
        };
        let resolved = self.resolver.resolve(&ticket.formats).await;
        self.publish(&ticket, resolved).await
    }

    /// Clears on an empty request, otherwise publishes the placeholder.
    ///
    /// With [`TriggerKind::Keyboard`] the channel write happens inside the
    /// next copy capture signal, which the caller must dispatch concurrently.
    #[tracing::instrument(
        name = "usecase.copy.begin",
        skip(self, formats),
        fields(requested = formats.len(), trigger = trigger.as_str())
    )]
    pub async fn begin(&self, formats: &[FormatTag], trigger: TriggerKind) -> Option<CopyTicket> {
        let formats = requested_formats(formats);
        if formats.is_empty() {
            self.clear(trigger).await;
            return None;
        }

        let session_id = self.state.session_id();
        let metadata = CopyMetadata::started(session_id.clone());
        let placeholder = Replica::new(PayloadSet::placeholder(), Some(metadata.clone()));

        let channel_write = match trigger {
            TriggerKind::Keyboard => {
                self.write_in_gesture(ChannelEnvelope::seal(&placeholder)).await
            }
            TriggerKind::Programmatic => {
                self.channel.write(&ChannelEnvelope::seal(&placeholder)).await
            }
        };
        if let Err(err) = channel_write {
            self.log.failure("Placeholder channel write", &HarnessError::from(err));
        }
        self.publish_mirror(&placeholder, "Placeholder mirror write").await;

        self.state.record_copy(metadata).await;
        let in_flight = self.state.copy_started().await;
        self.ui.set_copy_in_progress(true);
        self.ui.set_paste_formats(&self.state.eligible_formats().await);
        info!(in_flight, "Copy placeholder published");

        Some(CopyTicket {
            formats,
            trigger,
            session_id,
        })
    }

    /// Publishes phase 2. On a resolution failure nothing is written.
    #[tracing::instrument(
        name = "usecase.copy.publish",
        skip_all,
        fields(formats = ticket.formats.len())
    )]
    pub async fn publish(
        &self,
        ticket: &CopyTicket,
        resolved: Result<PayloadSet, ContentError>,
    ) -> CopyReport {
        if self.state.copy_finished().await == 0 {
            self.ui.set_copy_in_progress(false);
        }

        let mut payloads = match resolved {
            Ok(payloads) => payloads,
            Err(err) => {
                self.log
                    .failure("Copy content resolution", &HarnessError::from(err.clone()));
                return CopyReport::Failed(err);
            }
        };

        let copied_at_ms = self.clock.now_ms();
        let stamped = payloads
            .get(&FormatTag::rich_text())
            .and_then(|content| content.as_text())
            .map(|html| wrap_with_copied_at(html, copied_at_ms));
        if let Some(html) = stamped {
            payloads.insert(FormatTag::rich_text(), PayloadContent::Text(html));
        }

        let metadata = CopyMetadata::completed(ticket.session_id.clone());
        let replica = Replica::new(payloads, Some(metadata.clone()));

        if let Err(err) = self.channel.write(&ChannelEnvelope::seal(&replica)).await {
            self.log.failure("Channel write", &HarnessError::from(err));
        }
        self.publish_mirror(&replica, "Mirror write").await;

        self.state.record_copy(metadata).await;
        self.ui.set_paste_formats(&self.state.eligible_formats().await);

        let aliases: Vec<&str> = ticket.formats.iter().map(|t| t.alias()).collect();
        self.log.info(&format!(
            "Copied {} via {}",
            aliases.join(", "),
            self.channel.transport()
        ));

        CopyReport::Published {
            formats: ticket.formats.clone(),
            copied_at_ms,
        }
    }

    async fn clear(&self, trigger: TriggerKind) {
        self.log.warn(EMPTY_SELECTION_MESSAGE);

        let reset = match trigger {
            TriggerKind::Keyboard => self.write_in_gesture(PayloadSet::new()).await,
            TriggerKind::Programmatic => self.channel.write(&PayloadSet::new()).await,
        };
        if let Err(err) = reset {
            self.log.failure("Channel reset", &HarnessError::from(err));
        }

        if self.storage_policy.mirrors() {
            for key in [MIRROR_PAYLOADS_KEY, MIRROR_METADATA_KEY] {
                if let Err(err) = self.mirror.remove(key).await {
                    self.log.failure("Mirror clear", &HarnessError::from(err));
                }
            }
        }
        self.state.clear_copy().await;
        self.ui.set_paste_formats(&self.state.eligible_formats().await);
        debug!("Replicas cleared");
    }

    /// Writes `payloads` inside the next copy capture signal.
    ///
    /// The handler is registered before the first suspension point so a gesture
    /// dispatched concurrently always finds it.
    async fn write_in_gesture(&self, payloads: PayloadSet) -> Result<(), ChannelError> {
        let (tx, rx) = oneshot::channel();
        let id = self.capture.register_once(
            CaptureKind::Copy,
            Box::new(move |data| {
                let rejected = data.set_all(payloads);
                let _ = tx.send(rejected);
            }),
        );

        match tokio::time::timeout(self.capture_timeout, rx).await {
            Ok(Ok(rejected)) => {
                for err in rejected {
                    warn!(error = %err, "Format skipped inside copy gesture");
                }
                Ok(())
            }
            Ok(Err(_)) | Err(_) => {
                self.capture.deregister(id);
                Err(ChannelError::CaptureRejected(CaptureKind::Copy))
            }
        }
    }

    /// Payloads first, then metadata, each independently fallible.
    async fn publish_mirror(&self, replica: &Replica, operation: &str) {
        if !self.storage_policy.mirrors() {
            return;
        }

        match ReplicaCodec::encode_payloads(&replica.payloads) {
            Ok(raw) => {
                if let Err(err) = self.mirror.put(MIRROR_PAYLOADS_KEY, raw).await {
                    self.log.failure(operation, &HarnessError::from(err));
                }
            }
            Err(err) => self.log.failure(operation, &HarnessError::from(err)),
        }

        if let Some(metadata) = &replica.metadata {
            match ReplicaCodec::encode_metadata(metadata) {
                Ok(raw) => {
                    if let Err(err) = self.mirror.put(MIRROR_METADATA_KEY, raw).await {
                        self.log.failure(operation, &HarnessError::from(err));
                    }
                }
                Err(err) => self.log.failure(operation, &HarnessError::from(err)),
            }
        }
    }
}

/// Drops duplicates and reserved tags, keeping the requested order.
fn requested_formats(formats: &[FormatTag]) -> Vec<FormatTag> {
    let mut out: Vec<FormatTag> = Vec::with_capacity(formats.len());
    for tag in formats {
        if tag.is_reserved() {
            warn!(format = %tag, "Reserved format cannot be copied; ignored");
            continue;
        }
        if !out.contains(tag) {
            out.push(tag.clone());
        }
    }
    out
}
