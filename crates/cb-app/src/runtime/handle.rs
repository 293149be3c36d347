use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot};

use cb_core::{FormatPolicy, FormatTag, TriggerKind};

use super::HarnessCommand;
use crate::state::StatusReport;
use crate::usecases::{CopyReport, PasteOutcome};

/// Sending side of a context's runtime.
#[derive(Debug, Clone)]
pub struct HarnessHandle {
    label: String,
    command_tx: mpsc::Sender<HarnessCommand>,
}

impl HarnessHandle {
    pub(crate) fn new(label: String, command_tx: mpsc::Sender<HarnessCommand>) -> Self {
        Self { label, command_tx }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    async fn send(&self, command: HarnessCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| anyhow!("runtime of {} has stopped", self.label))
    }

    /// Starts a copy. The returned receiver resolves once the copy is published,
    /// cleared or failed; dropping it does not cancel the copy.
    pub async fn copy(
        &self,
        formats: Vec<FormatTag>,
        trigger: TriggerKind,
    ) -> Result<oneshot::Receiver<CopyReport>> {
        let (done, rx) = oneshot::channel();
        self.send(HarnessCommand::Copy {
            formats,
            trigger,
            done,
        })
        .await?;
        Ok(rx)
    }

    /// Copies and waits for the outcome.
    pub async fn copy_and_wait(
        &self,
        formats: Vec<FormatTag>,
        trigger: TriggerKind,
    ) -> Result<CopyReport> {
        let rx = self.copy(formats, trigger).await?;
        rx.await
            .map_err(|_| anyhow!("runtime of {} dropped the copy", self.label))
    }

    pub async fn paste(&self, policy: FormatPolicy, trigger: TriggerKind) -> Result<PasteOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(HarnessCommand::Paste {
            policy,
            trigger,
            reply,
        })
        .await?;
        rx.await
            .map_err(|_| anyhow!("runtime of {} dropped the paste", self.label))
    }

    pub async fn status(&self) -> Result<StatusReport> {
        let (reply, rx) = oneshot::channel();
        self.send(HarnessCommand::Status { reply }).await?;
        rx.await
            .map_err(|_| anyhow!("runtime of {} dropped the status request", self.label))
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(HarnessCommand::Shutdown).await
    }
}
