use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, info_span, warn, Instrument};

use cb_core::ports::{CaptureKind, CaptureSignalPort, MirrorChange};
use cb_core::{FormatTag, TriggerKind};

use super::{HarnessCommand, HarnessEvent, HarnessHandle};
use crate::deps::{HarnessDeps, HarnessSettings};
use crate::state::HarnessState;
use crate::usecases::{
    CopyReport, PasteClipboard, RefreshEligibility, ReportEnvironment, StartCopy,
};

const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Dispatch loop of one context ("tab").
pub struct HarnessRuntime {
    label: String,
    state: Arc<HarnessState>,
    capture: Arc<dyn CaptureSignalPort>,
    copy: StartCopy,
    paste: PasteClipboard,
    refresh: RefreshEligibility,
    report: ReportEnvironment,
    command_rx: mpsc::Receiver<HarnessCommand>,
    event_tx: mpsc::UnboundedSender<HarnessEvent>,
    event_rx: mpsc::UnboundedReceiver<HarnessEvent>,
    mirror_rx: mpsc::UnboundedReceiver<MirrorChange>,
    shutting_down: bool,
}

impl HarnessRuntime {
    pub fn new(
        label: impl Into<String>,
        deps: HarnessDeps,
        settings: HarnessSettings,
    ) -> (Self, HarnessHandle) {
        let label = label.into();
        let state = Arc::new(HarnessState::new(deps.identity.clone()));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mirror_rx = deps.mirror.subscribe();

        let runtime = Self {
            copy: StartCopy::from_deps(&deps, &settings, state.clone()),
            paste: PasteClipboard::from_deps(&deps, &settings, state.clone()),
            refresh: RefreshEligibility::new(state.clone(), deps.ui.clone()),
            report: ReportEnvironment::new(deps.permissions.clone(), deps.ui.clone(), state.clone()),
            capture: deps.capture.clone(),
            label: label.clone(),
            state,
            command_rx,
            event_tx,
            event_rx,
            mirror_rx,
            shutting_down: false,
        };
        (runtime, HarnessHandle::new(label, command_tx))
    }

    pub fn state(&self) -> Arc<HarnessState> {
        self.state.clone()
    }

    pub async fn start(mut self) {
        let span = info_span!("runtime.context", context = %self.label);
        async move {
            self.report.execute().await;
            info!("Context runtime started");

            while !self.shutting_down {
                tokio::select! {
                    command = self.command_rx.recv() => match command {
                        Some(command) => self.handle_command(command).await,
                        None => {
                            debug!("All handles dropped");
                            self.shutting_down = true;
                        }
                    },
                    Some(event) = self.event_rx.recv() => {
                        self.handle_event(event).await;
                    }
                    Some(change) = self.mirror_rx.recv() => {
                        self.refresh.execute(&change).await;
                    }
                }
            }
            info!("Context runtime stopped");
        }
        .instrument(span)
        .await
    }

    async fn handle_command(&mut self, command: HarnessCommand) {
        match command {
            HarnessCommand::Copy {
                formats,
                trigger,
                done,
            } => self.start_copy(formats, trigger, done).await,
            HarnessCommand::Paste {
                policy,
                trigger,
                reply,
            } => {
                let outcome = match trigger {
                    TriggerKind::Programmatic => self.paste.execute(policy, trigger).await,
                    TriggerKind::Keyboard => {
                        let (outcome, observed) = tokio::join!(
                            self.paste.execute(policy, trigger),
                            self.capture.dispatch_gesture(CaptureKind::Paste)
                        );
                        debug!(observed, "Paste gesture dispatched");
                        outcome
                    }
                };
                let _ = reply.send(outcome);
            }
            HarnessCommand::Status { reply } => {
                let _ = reply.send(self.state.status().await);
            }
            HarnessCommand::Shutdown => {
                info!("Context runtime shutting down");
                self.shutting_down = true;
            }
        }
    }

    async fn start_copy(
        &self,
        formats: Vec<FormatTag>,
        trigger: TriggerKind,
        done: oneshot::Sender<CopyReport>,
    ) {
        let ticket = match trigger {
            TriggerKind::Programmatic => self.copy.begin(&formats, trigger).await,
            TriggerKind::Keyboard => {
                let (ticket, observed) = tokio::join!(
                    self.copy.begin(&formats, trigger),
                    self.capture.dispatch_gesture(CaptureKind::Copy)
                );
                debug!(observed, "Copy gesture dispatched");
                ticket
            }
        };

        let Some(ticket) = ticket else {
            let _ = done.send(CopyReport::Cleared);
            return;
        };

        // Resolution runs off the loop so later commands are not blocked by it.
        let resolver = self.copy.resolver();
        let event_tx = self.event_tx.clone();
        tokio::spawn(
            async move {
                let result = resolver.resolve(&ticket.formats).await;
                if event_tx
                    .send(HarnessEvent::CopyResolved { ticket, result, done })
                    .is_err()
                {
                    warn!("Runtime stopped before copy resolution finished");
                }
            }
            .in_current_span(),
        );
    }

    async fn handle_event(&mut self, event: HarnessEvent) {
        match event {
            HarnessEvent::CopyResolved {
                ticket,
                result,
                done,
            } => {
                let report = self.copy.publish(&ticket, result).await;
                let _ = done.send(report);
            }
        }
    }
}
