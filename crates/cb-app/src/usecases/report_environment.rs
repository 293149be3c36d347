use std::sync::Arc;

use cb_core::ports::{ClipboardCapability, PermissionQueryPort, UiPort};

use crate::state::HarnessState;

/// Shows the session id, the advisory permission states and the initial paste controls.
pub struct ReportEnvironment {
    permissions: Arc<dyn PermissionQueryPort>,
    ui: Arc<dyn UiPort>,
    state: Arc<HarnessState>,
}

impl ReportEnvironment {
    pub fn new(
        permissions: Arc<dyn PermissionQueryPort>,
        ui: Arc<dyn UiPort>,
        state: Arc<HarnessState>,
    ) -> Self {
        Self {
            permissions,
            ui,
            state,
        }
    }

    #[tracing::instrument(name = "usecase.report_environment.execute", skip_all)]
    pub async fn execute(&self) {
        self.ui.show_session(&self.state.session_id());
        for capability in [ClipboardCapability::Read, ClipboardCapability::Write] {
            let permission = self.permissions.query(capability).await;
            self.ui.show_permission(capability, permission);
        }
        self.ui.set_paste_formats(&self.state.eligible_formats().await);
    }
}
