use std::sync::Arc;

use tracing::{error, info, warn};

use cb_core::ports::{LogLevel, UiPort};
use cb_core::HarnessError;

/// Writes each message to both `tracing` and the UI log pane.
#[derive(Clone)]
pub struct HarnessLog {
    ui: Arc<dyn UiPort>,
}

impl HarnessLog {
    pub fn new(ui: Arc<dyn UiPort>) -> Self {
        Self { ui }
    }

    pub fn info(&self, message: &str) {
        info!("{message}");
        self.ui.append_log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("{message}");
        self.ui.append_log(LogLevel::Warn, message);
    }

    /// Reports a degraded operation. Never fatal.
    pub fn failure(&self, operation: &str, err: &HarnessError) {
        let message = format!("{operation} failed ({}): {err}", err.category());
        match err {
            HarnessError::ContentResolution(_) => {
                error!(category = err.category(), "{message}");
                self.ui.append_log(LogLevel::Error, &message);
            }
            _ => {
                warn!(category = err.category(), "{message}");
                self.ui.append_log(LogLevel::Warn, &message);
            }
        }
    }
}
