use std::sync::Arc;

use tracing::debug;

use cb_core::clipboard::ReplicaCodec;
use cb_core::ports::{MirrorChange, UiPort, MIRROR_METADATA_KEY, MIRROR_PAYLOADS_KEY};
use cb_core::Classification;

use crate::log::HarnessLog;
use crate::state::HarnessState;

/// Reacts to another context's copy by re-deriving which paste formats are enabled.
///
/// Only the notification payload is used here; pastes always re-read both replicas.
pub struct RefreshEligibility {
    state: Arc<HarnessState>,
    ui: Arc<dyn UiPort>,
    log: HarnessLog,
}

impl RefreshEligibility {
    pub fn new(state: Arc<HarnessState>, ui: Arc<dyn UiPort>) -> Self {
        Self {
            state,
            log: HarnessLog::new(ui.clone()),
            ui,
        }
    }

    #[tracing::instrument(name = "usecase.refresh_eligibility.execute", skip_all, fields(key = %change.key))]
    pub async fn execute(&self, change: &MirrorChange) {
        match change.key.as_str() {
            MIRROR_METADATA_KEY => {}
            MIRROR_PAYLOADS_KEY => {
                debug!("Mirror payloads changed in another context");
                return;
            }
            other => {
                debug!(key = other, "Ignoring unwatched mirror key");
                return;
            }
        }

        let classification = match &change.new_value {
            Some(raw) => match ReplicaCodec::decode_metadata(raw) {
                Ok(metadata) => {
                    let classification =
                        Classification::of(Some(&metadata), &self.state.session_id());
                    self.log.info(&format!(
                        "Copy {:?} in another context ({classification})",
                        metadata.copy_status
                    ));
                    Some(classification)
                }
                Err(err) => {
                    debug!(error = %err, "Mirror metadata unreadable; origin unknown");
                    None
                }
            },
            None => {
                self.log.info("Copy cleared in another context");
                None
            }
        };

        self.state.record_classification(classification).await;
        self.ui.set_paste_formats(&self.state.eligible_formats().await);
    }
}
