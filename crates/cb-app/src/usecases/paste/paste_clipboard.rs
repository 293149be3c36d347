use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info};

use cb_core::clipboard::{
    eligible_formats, is_eligible, reconcile, select_format, ChannelEnvelope, FormatSelection,
    MirrorRead, ReconcileOutcome, ReplicaCodec,
};
use cb_core::ports::{
    CaptureKind, CaptureSignalPort, ChannelError, MirrorStorePort, TransferChannelPort, UiPort,
    MIRROR_METADATA_KEY, MIRROR_PAYLOADS_KEY,
};
use cb_core::{
    Classification, FormatPolicy, FormatTag, HarnessError, PayloadSet, Replica, ReplicaKind,
    StoragePolicy, TriggerKind,
};

use crate::deps::{HarnessDeps, HarnessSettings};
use crate::log::HarnessLog;
use crate::state::HarnessState;

/// How a paste ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The channel could not be read. Classification left untouched.
    Aborted,
    /// The requested format is not eligible for this classification.
    Denied {
        tag: FormatTag,
        classification: Classification,
    },
    /// No eligible format found under the default priority.
    NotFound { classification: Classification },
    Rendered {
        selection: FormatSelection,
        classification: Classification,
        source: ReplicaKind,
    },
}

/// Paste flow: reads both replicas, reconciles them, classifies the winner,
/// gates the request and renders the selected format.
pub struct PasteClipboard {
    channel: Arc<dyn TransferChannelPort>,
    capture: Arc<dyn CaptureSignalPort>,
    mirror: Arc<dyn MirrorStorePort>,
    ui: Arc<dyn UiPort>,
    state: Arc<HarnessState>,
    log: HarnessLog,
    storage_policy: StoragePolicy,
    capture_timeout: Duration,
}

impl PasteClipboard {
    pub fn from_deps(
        deps: &HarnessDeps,
        settings: &HarnessSettings,
        state: Arc<HarnessState>,
    ) -> Self {
        Self {
            channel: deps.channel.clone(),
            capture: deps.capture.clone(),
            mirror: deps.mirror.clone(),
            ui: deps.ui.clone(),
            state,
            log: HarnessLog::new(deps.ui.clone()),
            storage_policy: settings.storage_policy,
            capture_timeout: settings.capture_timeout,
        }
    }

    /// With [`TriggerKind::Keyboard`] the channel is read inside the next paste
    /// capture signal, which the caller must dispatch concurrently.
    #[tracing::instrument(
        name = "usecase.paste.execute",
        skip(self, policy),
        fields(trigger = trigger.as_str())
    )]
    pub async fn execute(&self, policy: FormatPolicy, trigger: TriggerKind) -> PasteOutcome {
        let channel = match self.read_channel(trigger).await {
            Ok(raw) => Some(ChannelEnvelope::open(raw)),
            Err(err) => {
                self.log.failure("Channel read", &HarnessError::from(err));
                None
            }
        };
        let mirror = self.read_mirror().await;

        let reconciled = match reconcile(channel, mirror, &self.state.session_id()) {
            ReconcileOutcome::Aborted => {
                self.log.warn("Paste aborted: channel unreadable");
                return PasteOutcome::Aborted;
            }
            ReconcileOutcome::Resolved(reconciled) => reconciled,
        };

        let classification = reconciled.classification;
        debug!(
            source = reconciled.source.as_str(),
            reason = ?reconciled.reason,
            %classification,
            "Replicas reconciled"
        );
        self.state.record_classification(Some(classification)).await;
        let eligible = eligible_formats(Some(classification));
        self.ui.set_paste_formats(&eligible);

        let selection = match &policy {
            FormatPolicy::Explicit(tag) if !is_eligible(tag, Some(classification)) => {
                self.log.warn(&format!(
                    "Paste of {} not allowed for {} content",
                    tag.alias(),
                    classification
                ));
                return PasteOutcome::Denied {
                    tag: tag.clone(),
                    classification,
                };
            }
            FormatPolicy::Explicit(_) => select_format(&reconciled.replica.payloads, &policy),
            FormatPolicy::DefaultPriority => {
                let mut candidates = reconciled.replica.payloads.clone();
                candidates.retain_formats(&eligible);
                select_format(&candidates, &policy)
            }
        };

        let Some(selection) = selection else {
            self.log
                .warn(&format!("No pasteable format found in {classification} content"));
            return PasteOutcome::NotFound { classification };
        };

        self.ui.render_paste(&selection, classification);
        info!(
            format = %selection.tag,
            present = selection.content.is_some(),
            source = reconciled.source.as_str(),
            "Paste rendered"
        );
        PasteOutcome::Rendered {
            selection,
            classification,
            source: reconciled.source,
        }
    }

    async fn read_channel(&self, trigger: TriggerKind) -> Result<PayloadSet, ChannelError> {
        match trigger {
            TriggerKind::Programmatic => self.channel.read().await,
            TriggerKind::Keyboard => self.read_in_gesture().await,
        }
    }

    async fn read_in_gesture(&self) -> Result<PayloadSet, ChannelError> {
        let (tx, rx) = oneshot::channel();
        let id = self.capture.register_once(
            CaptureKind::Paste,
            Box::new(move |data| {
                let _ = tx.send(data.payloads().clone());
            }),
        );

        match tokio::time::timeout(self.capture_timeout, rx).await {
            Ok(Ok(payloads)) => Ok(payloads),
            Ok(Err(_)) | Err(_) => {
                self.capture.deregister(id);
                Err(ChannelError::CaptureRejected(CaptureKind::Paste))
            }
        }
    }

    /// Maps the store's state onto the reconciler's view of the mirror.
    ///
    /// Unreadable or malformed payloads make the mirror unavailable; unreadable
    /// or malformed metadata only makes it origin-less.
    async fn read_mirror(&self) -> MirrorRead {
        if !self.storage_policy.mirrors() {
            return MirrorRead::Disabled;
        }

        let payloads = match self.mirror.get(MIRROR_PAYLOADS_KEY).await {
            Ok(Some(raw)) => match ReplicaCodec::decode_payloads(&raw) {
                Ok(payloads) => payloads,
                Err(err) => {
                    self.log.failure("Mirror read", &HarnessError::from(err.clone()));
                    return MirrorRead::Unavailable(err.to_string());
                }
            },
            Ok(None) => return MirrorRead::Absent,
            Err(err) => {
                self.log.failure("Mirror read", &HarnessError::from(err.clone()));
                return MirrorRead::Unavailable(err.to_string());
            }
        };

        let metadata = match self.mirror.get(MIRROR_METADATA_KEY).await {
            Ok(Some(raw)) => match ReplicaCodec::decode_metadata(&raw) {
                Ok(metadata) => Some(metadata),
                Err(err) => {
                    debug!(error = %err, "Mirror metadata unreadable; treated as absent");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                debug!(error = %err, "Mirror metadata unreadable; treated as absent");
                None
            }
        };

        MirrorRead::Present(Replica::new(payloads, metadata))
    }
}
